//! Android implementation using JNI.
//!
//! The hosting activity hands itself over once through [`init`]; every other
//! crate of the shell reaches the platform through [`with_activity`].

use std::sync::{Mutex, OnceLock, PoisonError};

use jni::objects::{GlobalRef, JObject, JValue};
use jni::{JNIEnv, JavaVM};

use crate::SystemError;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();
static ACTIVITY: Mutex<Option<GlobalRef>> = Mutex::new(None);

const ACTION_VIEW: &str = "android.intent.action.VIEW";
const ACTION_APPLICATION_DETAILS_SETTINGS: &str = "android.settings.APPLICATION_DETAILS_SETTINGS";
const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// Remember the VM and the current activity.
///
/// Called again when the activity is recreated; the newest activity wins.
///
/// # Errors
/// Returns the JNI error if the VM or a global reference cannot be obtained.
pub fn init(env: &mut JNIEnv, activity: &JObject) -> Result<(), SystemError> {
    if JAVA_VM.get().is_none() {
        let _ = JAVA_VM.set(env.get_java_vm()?);
    }
    let global = env.new_global_ref(activity)?;
    *ACTIVITY.lock().unwrap_or_else(PoisonError::into_inner) = Some(global);
    Ok(())
}

/// Run `f` with an attached env and the current activity.
///
/// A Java exception raised inside `f` is cleared before returning so the
/// caller's thread can keep making JNI calls.
///
/// # Errors
/// Returns [`SystemError::NotInitialized`] before [`init`], or the error `f` returned.
pub fn with_activity<T, F>(f: F) -> Result<T, SystemError>
where
    F: FnOnce(&mut JNIEnv, &JObject) -> jni::errors::Result<T>,
{
    let vm = JAVA_VM.get().ok_or(SystemError::NotInitialized)?;
    let activity = ACTIVITY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(SystemError::NotInitialized)?;

    let mut env = vm.attach_current_thread()?;
    let result = f(&mut env, activity.as_obj());
    if result.is_err() && env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    Ok(result?)
}

fn start_activity(action: &str, uri: &str, flags: i32) -> Result<(), SystemError> {
    with_activity(|env, activity| {
        let uri = env.new_string(uri)?;
        let uri = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&uri)],
            )?
            .l()?;
        let action = env.new_string(action)?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;Landroid/net/Uri;)V",
            &[JValue::Object(&action), JValue::Object(&uri)],
        )?;
        if flags != 0 {
            env.call_method(
                &intent,
                "addFlags",
                "(I)Landroid/content/Intent;",
                &[JValue::Int(flags)],
            )?;
        }
        env.call_method(
            activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&intent)],
        )?;
        Ok(())
    })
}

pub(crate) fn open_url(url: &str) -> Result<(), SystemError> {
    start_activity(ACTION_VIEW, url, FLAG_ACTIVITY_NEW_TASK)
}

pub(crate) fn open_app_settings(uri: &str) -> Result<(), SystemError> {
    start_activity(ACTION_APPLICATION_DETAILS_SETTINGS, uri, 0)
}

pub(crate) fn finish_screen() -> Result<(), SystemError> {
    with_activity(|env, activity| env.call_method(activity, "finish", "()V", &[]).map(drop))
}

pub(crate) fn platform_version() -> Option<u32> {
    let sdk = with_activity(|env, _| {
        env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
            .i()
    });
    match sdk {
        Ok(sdk) => u32::try_from(sdk).ok(),
        Err(e) => {
            log::warn!("could not read SDK_INT: {e}");
            None
        }
    }
}

pub(crate) fn package_name() -> Option<String> {
    with_activity(|env, activity| {
        let name = env
            .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])?
            .l()?;
        Ok(env.get_string((&name).into())?.into())
    })
    .ok()
}
