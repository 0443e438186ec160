//! `android.webkit.WebView` as a [`BrowserSurface`].

use jni::JNIEnv;
use jni::objects::{GlobalRef, JObject, JObjectArray, JValue};
use jni::sys::jsize;

use crate::{BrowserError, BrowserSettings, BrowserSurface, WebResource};

/// A `WebView` owned by the hosting activity.
///
/// All calls must happen on the UI thread the view was created on.
#[derive(Debug, Clone)]
pub struct AndroidWebView {
    view: GlobalRef,
}

impl AndroidWebView {
    /// Wrap the activity's `WebView`.
    ///
    /// # Errors
    /// Returns an error if a global reference cannot be created.
    pub fn new(env: &mut JNIEnv, view: &JObject) -> Result<Self, BrowserError> {
        let view = env.new_global_ref(view).map_err(surface_error)?;
        Ok(Self { view })
    }

    fn call<F>(&self, f: F) -> Result<(), BrowserError>
    where
        F: FnOnce(&mut JNIEnv, &JObject) -> jni::errors::Result<()>,
    {
        catchat_system::android::with_activity(|env, _| f(env, self.view.as_obj()))
            .map_err(|e| BrowserError::Surface(e.to_string()))
    }
}

fn surface_error(e: jni::errors::Error) -> BrowserError {
    BrowserError::Surface(e.to_string())
}

fn set_flag(env: &mut JNIEnv, target: &JObject, setter: &str, value: bool) -> jni::errors::Result<()> {
    env.call_method(target, setter, "(Z)V", &[JValue::Bool(u8::from(value))])?;
    Ok(())
}

impl BrowserSurface for AndroidWebView {
    fn apply_settings(&mut self, settings: &BrowserSettings) -> Result<(), BrowserError> {
        self.call(|env, view| {
            let web = env
                .call_method(view, "getSettings", "()Landroid/webkit/WebSettings;", &[])?
                .l()?;
            set_flag(env, &web, "setJavaScriptEnabled", settings.javascript_enabled)?;
            set_flag(env, &web, "setDomStorageEnabled", settings.dom_storage_enabled)?;
            set_flag(
                env,
                &web,
                "setJavaScriptCanOpenWindowsAutomatically",
                settings.javascript_can_open_windows,
            )?;
            set_flag(env, &web, "setSupportMultipleWindows", settings.support_multiple_windows)?;
            set_flag(env, &web, "setAllowFileAccess", settings.allow_file_access)?;
            set_flag(
                env,
                &web,
                "setMediaPlaybackRequiresUserGesture",
                settings.media_playback_requires_user_gesture,
            )?;
            env.call_method(
                &web,
                "setMixedContentMode",
                "(I)V",
                &[JValue::Int(settings.mixed_content.platform_value())],
            )?;

            let cookies = env
                .call_static_method(
                    "android/webkit/CookieManager",
                    "getInstance",
                    "()Landroid/webkit/CookieManager;",
                    &[],
                )?
                .l()?;
            set_flag(env, &cookies, "setAcceptCookie", settings.accept_cookies)?;
            env.call_method(
                &cookies,
                "setAcceptThirdPartyCookies",
                "(Landroid/webkit/WebView;Z)V",
                &[
                    JValue::Object(view),
                    JValue::Bool(u8::from(settings.accept_third_party_cookies)),
                ],
            )?;
            Ok(())
        })
    }

    fn load_url(&mut self, url: &str) -> Result<(), BrowserError> {
        self.call(|env, view| {
            let url = env.new_string(url)?;
            env.call_method(view, "loadUrl", "(Ljava/lang/String;)V", &[JValue::Object(&url)])?;
            Ok(())
        })
    }
}

/// Read a `String[]` of `PermissionRequest` resource ids.
///
/// # Errors
/// Returns the JNI error if an element cannot be read.
pub fn resources_from_java(
    env: &mut JNIEnv,
    array: &JObjectArray,
) -> jni::errors::Result<Vec<WebResource>> {
    let len = env.get_array_length(array)?;
    let mut resources = Vec::with_capacity(usize::try_from(len).unwrap_or_default());
    for i in 0..len {
        let element = env.get_object_array_element(array, i)?;
        let id: String = env.get_string((&element).into())?.into();
        resources.push(WebResource::from_platform(&id));
    }
    Ok(resources)
}

/// Build the `String[]` handed to `PermissionRequest.grant`.
///
/// # Errors
/// Returns the JNI error if the array cannot be built.
pub fn resources_to_java<'local>(
    env: &mut JNIEnv<'local>,
    resources: &[WebResource],
) -> jni::errors::Result<JObjectArray<'local>> {
    let len = jsize::try_from(resources.len()).unwrap_or(jsize::MAX);
    let array = env.new_object_array(len, "java/lang/String", JObject::null())?;
    for (i, resource) in (0..len).zip(resources) {
        let id = env.new_string(resource.platform_id())?;
        env.set_object_array_element(&array, i, id)?;
    }
    Ok(array)
}
