//! Android permission implementation using JNI.
//!
//! Checks go straight to `Activity.checkSelfPermission`. Requests go through
//! `Activity.requestPermissions`; the activity forwards
//! `onRequestPermissionsResult` to [`deliver_result`], which completes the
//! batch with the matching request code.

use std::sync::{LazyLock, Mutex, PoisonError};

use jni::objects::{JObject, JValue};
use jni::sys::jsize;
use log::{error, warn};

use crate::{Capability, CapabilitySet, InFlightBatches, PERMISSION_GRANTED, PendingGrant};

static IN_FLIGHT: LazyLock<Mutex<InFlightBatches>> =
    LazyLock::new(|| Mutex::new(InFlightBatches::new()));

fn in_flight() -> std::sync::MutexGuard<'static, InFlightBatches> {
    IN_FLIGHT.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn is_granted(capability: Capability) -> bool {
    let status = catchat_system::android::with_activity(|env, activity| {
        let name = env.new_string(capability.manifest_name())?;
        env.call_method(
            activity,
            "checkSelfPermission",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&name)],
        )?
        .i()
    });
    match status {
        Ok(status) => status == PERMISSION_GRANTED,
        Err(e) => {
            warn!("checkSelfPermission({}) failed: {e}", capability.manifest_name());
            false
        }
    }
}

pub(crate) fn request(capabilities: &CapabilitySet) -> PendingGrant {
    let (code, pending) = in_flight().issue();

    let sent = catchat_system::android::with_activity(|env, activity| {
        let len = jsize::try_from(capabilities.len()).unwrap_or(jsize::MAX);
        let names = env.new_object_array(len, "java/lang/String", JObject::null())?;
        for (i, capability) in (0..len).zip(capabilities) {
            let name = env.new_string(capability.manifest_name())?;
            env.set_object_array_element(&names, i, name)?;
        }
        env.call_method(
            activity,
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&names), JValue::Int(code)],
        )?;
        Ok(())
    });

    if let Err(e) = sent {
        error!("requestPermissions failed: {e}");
        in_flight().cancel(code);
    }
    pending
}

/// Complete the batch issued with `request_code`.
///
/// `permissions` and `grant_results` are the arrays handed to
/// `onRequestPermissionsResult`; see [`crate::GrantOutcome::from_platform`].
/// Empty arrays mean the prompt was abandoned and the batch resolves with an
/// empty outcome. Returns `false` when no batch was waiting on that code.
pub fn deliver_result(request_code: i32, permissions: &[String], grant_results: &[i32]) -> bool {
    in_flight().deliver(request_code, permissions, grant_results)
}
