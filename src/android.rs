//! JNI entry points for `com.teslakitty.catchat.MainActivity`.
//!
//! The activity owns the views and forwards its callbacks here:
//!
//! | Kotlin callback                      | Native method                        |
//! |--------------------------------------|--------------------------------------|
//! | `onCreate`                           | `nativeOnCreate(webView)`            |
//! | home / video-chat button             | `nativeOnHome()` / `nativeOnVideoChat()` |
//! | `WebViewClient.onPageFinished`       | `nativeOnPageFinished(url)`          |
//! | `WebChromeClient.onCreateWindow`     | `nativeOnCreateWindow(url): Boolean` |
//! | `WebChromeClient.onPermissionRequest`| `nativeOnPermissionRequest(resources): Array<String>` |
//! | `onRequestPermissionsResult`         | `nativeOnRequestPermissionsResult(code, permissions, results)` |
//! | `onDestroy`                          | `nativeOnDestroy()`                  |

#![allow(non_snake_case)]

use std::sync::{Mutex, PoisonError};

use catchat_browser::sys::android::{AndroidWebView, resources_from_java, resources_to_java};
use catchat_browser::{SystemBrowser, Trigger};
use catchat_permission::PlatformStore;
use jni::JNIEnv;
use jni::objects::{JIntArray, JObject, JObjectArray, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint, jobjectArray};
use log::{LevelFilter, error, info};

use crate::{MainScreen, NativeUi, ShellConfig, ShellError};

type Screen = MainScreen<AndroidWebView, SystemBrowser>;

static SCREEN: Mutex<Option<Screen>> = Mutex::new(None);

fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag("catchat"),
    );
}

fn with_screen<T>(f: impl FnOnce(&mut Screen) -> T) -> Option<T> {
    let mut guard = SCREEN.lock().unwrap_or_else(PoisonError::into_inner);
    let screen = guard.as_mut();
    if screen.is_none() {
        error!("screen callback before nativeOnCreate");
    }
    screen.map(f)
}

fn launch(env: &mut JNIEnv, activity: &JObject, web_view: &JObject) -> Result<(), ShellError> {
    catchat_system::android::init(env, activity)?;

    let mut config = ShellConfig::default();
    if let Some(package_id) = catchat_system::package_name() {
        config.package_id = package_id;
    }

    let surface = AndroidWebView::new(env, web_view)?;
    let (screen, prompt) = MainScreen::launch(
        config,
        surface,
        SystemBrowser,
        PlatformStore,
        catchat_system::platform_version(),
    )?;
    *SCREEN.lock().unwrap_or_else(PoisonError::into_inner) = Some(screen);

    // The result callback arrives on the UI thread; wait for it elsewhere.
    std::thread::Builder::new()
        .name("catchat-permissions".into())
        .spawn(move || match futures::executor::block_on(prompt.run(&NativeUi)) {
            Ok(flow) => info!("permission flow finished: {flow:?}"),
            Err(e) => error!("permission flow failed: {e}"),
        })?;
    Ok(())
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    match env.get_string(value) {
        Ok(value) => Some(value.into()),
        Err(e) => {
            error!("unreadable string from Java: {e}");
            None
        }
    }
}

fn read_results(
    env: &mut JNIEnv,
    permissions: &JObjectArray,
    results: &JIntArray,
) -> jni::errors::Result<(Vec<String>, Vec<i32>)> {
    let count = env.get_array_length(permissions)?;
    let mut names = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
    for i in 0..count {
        let element = env.get_object_array_element(permissions, i)?;
        names.push(env.get_string((&element).into())?.into());
    }

    let count = env.get_array_length(results)?;
    let mut codes = vec![0; usize::try_from(count).unwrap_or_default()];
    env.get_int_array_region(results, 0, &mut codes)?;
    Ok((names, codes))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnCreate<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
    web_view: JObject<'local>,
) {
    init_logging();
    if let Err(e) = launch(&mut env, &activity, &web_view) {
        error!("launch failed: {e}");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnHome<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    if let Some(Err(e)) = with_screen(|screen| screen.press(Trigger::Home)) {
        error!("home navigation failed: {e}");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnVideoChat<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    if let Some(Err(e)) = with_screen(|screen| screen.press(Trigger::VideoChat)) {
        error!("video chat navigation failed: {e}");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnPageFinished<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    url: JString<'local>,
) {
    if let Some(url) = read_string(&mut env, &url) {
        with_screen(|screen| screen.page_finished(&url));
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnCreateWindow<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    url: JString<'local>,
) -> jboolean {
    let handled = read_string(&mut env, &url)
        .and_then(|url| with_screen(|screen| screen.on_popup(&url)))
        .unwrap_or(false);
    if handled { JNI_TRUE } else { JNI_FALSE }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnPermissionRequest<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    resources: JObjectArray<'local>,
) -> jobjectArray {
    let requested = match resources_from_java(&mut env, &resources) {
        Ok(requested) => requested,
        Err(e) => {
            error!("unreadable page permission request: {e}");
            return std::ptr::null_mut();
        }
    };
    let granted = with_screen(|screen| screen.on_permission_request(requested)).unwrap_or_default();
    match resources_to_java(&mut env, &granted) {
        Ok(array) => array.into_raw(),
        Err(e) => {
            error!("could not build granted resources: {e}");
            std::ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnRequestPermissionsResult<
    'local,
>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    request_code: jint,
    permissions: JObjectArray<'local>,
    grant_results: JIntArray<'local>,
) {
    match read_results(&mut env, &permissions, &grant_results) {
        Ok((names, codes)) => {
            catchat_permission::sys::android::deliver_result(request_code, &names, &codes);
        }
        Err(e) => {
            error!("unreadable permission result: {e}");
            // Still resolve the batch so the flow can show the dialog.
            catchat_permission::sys::android::deliver_result(request_code, &[], &[]);
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_MainActivity_nativeOnDestroy<'local>(
    _env: JNIEnv<'local>,
    _activity: JObject<'local>,
) {
    SCREEN.lock().unwrap_or_else(PoisonError::into_inner).take();
}
