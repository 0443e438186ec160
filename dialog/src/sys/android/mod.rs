//! Android dialogs through the app-side `ShellBridge` class.
//!
//! `ShellBridge` builds the `AlertDialog` / `Toast` on the UI thread and
//! reports the chosen button back through `nativeOnChoice`.

use std::sync::{Mutex, PoisonError};

use futures::channel::oneshot;
use jni::JNIEnv;
use jni::objects::{JClass, JObject, JValue};
use jni::sys::{JNI_TRUE, jboolean};
use log::warn;

use crate::{Dialog, DialogError, Toast, ToastDuration};

const BRIDGE_CLASS: &str = "com.teslakitty.catchat.ShellBridge";

// Toast.LENGTH_SHORT / Toast.LENGTH_LONG
const LENGTH_SHORT: i32 = 0;
const LENGTH_LONG: i32 = 1;

static PENDING_CHOICE: Mutex<Option<oneshot::Sender<bool>>> = Mutex::new(None);

/// Load the bridge through the activity's class loader; `FindClass` on a
/// native thread only sees system classes.
fn bridge_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
) -> jni::errors::Result<JClass<'local>> {
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    let name = env.new_string(BRIDGE_CLASS)?;
    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )?
        .l()?;
    Ok(class.into())
}

/// Show a choice dialog and wait for `nativeOnChoice`.
///
/// # Errors
/// Returns [`DialogError::Cancelled`] if another dialog replaces this one
/// before the user answers.
pub async fn show_confirm(dialog: Dialog) -> Result<bool, DialogError> {
    let (tx, rx) = oneshot::channel();
    if PENDING_CHOICE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(tx)
        .is_some()
    {
        warn!("a previous choice dialog was still open; it is now cancelled");
    }

    catchat_system::android::with_activity(|env, activity| {
        let class = bridge_class(env, activity)?;
        let title = env.new_string(&dialog.title)?;
        let message = env.new_string(&dialog.message)?;
        let confirm = env.new_string(&dialog.confirm_label)?;
        let cancel = env.new_string(&dialog.cancel_label)?;
        env.call_static_method(
            class,
            "showChoice",
            "(Landroid/app/Activity;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)V",
            &[
                JValue::Object(activity),
                JValue::Object(&title),
                JValue::Object(&message),
                JValue::Object(&confirm),
                JValue::Object(&cancel),
            ],
        )?;
        Ok(())
    })
    .map_err(|e| DialogError::PlatformError(e.to_string()))?;

    rx.await.map_err(|_| DialogError::Cancelled)
}

/// Show a toast through the bridge.
///
/// # Errors
/// Returns the JNI failure as [`DialogError::PlatformError`].
pub fn show_toast(toast: &Toast) -> Result<(), DialogError> {
    let length = match toast.duration {
        ToastDuration::Short => LENGTH_SHORT,
        ToastDuration::Long => LENGTH_LONG,
    };
    catchat_system::android::with_activity(|env, activity| {
        let class = bridge_class(env, activity)?;
        let message = env.new_string(&toast.message)?;
        env.call_static_method(
            class,
            "showToast",
            "(Landroid/app/Activity;Ljava/lang/String;I)V",
            &[
                JValue::Object(activity),
                JValue::Object(&message),
                JValue::Int(length),
            ],
        )?;
        Ok(())
    })
    .map_err(|e| DialogError::PlatformError(e.to_string()))
}

/// Resolve the open choice dialog. Returns `false` if none was waiting.
pub fn deliver_choice(confirmed: bool) -> bool {
    let pending = PENDING_CHOICE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    match pending {
        Some(tx) => tx.send(confirmed).is_ok(),
        None => {
            warn!("choice {confirmed} arrived with no dialog waiting");
            false
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_teslakitty_catchat_ShellBridge_nativeOnChoice<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    confirmed: jboolean,
) {
    deliver_choice(confirmed == JNI_TRUE);
}
