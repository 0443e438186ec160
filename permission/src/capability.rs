use serde::{Deserialize, Serialize};

/// A discrete OS-gated permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Capability {
    /// Open network sockets.
    Internet,
    /// Query network connectivity.
    AccessNetworkState,
    /// Query Wi-Fi state.
    AccessWifiState,
    /// Record audio from the microphone.
    RecordAudio,
    /// Access the camera.
    Camera,
    /// Change global audio settings (speakerphone, routing).
    ModifyAudioSettings,
    /// Read shared storage.
    ReadExternalStorage,
    /// Write shared storage.
    WriteExternalStorage,
    /// Broad access to all files on shared storage.
    ManageExternalStorage,
    /// Precise location.
    AccessFineLocation,
    /// Approximate location.
    AccessCoarseLocation,
    /// Run foreground services.
    ForegroundService,
    /// Read contacts.
    ReadContacts,
    /// Write contacts.
    WriteContacts,
    /// Send SMS messages.
    SendSms,
    /// Receive SMS messages.
    ReceiveSms,
    /// Read SMS messages.
    ReadSms,
    /// Receive MMS messages.
    ReceiveMms,
    /// Place phone calls.
    CallPhone,
    /// Read telephony state.
    ReadPhoneState,
    /// Use biometric authentication.
    UseBiometric,
    /// Connect to paired Bluetooth devices (legacy).
    Bluetooth,
    /// Discover and pair Bluetooth devices (legacy).
    BluetoothAdmin,
    /// Connect to paired Bluetooth devices.
    BluetoothConnect,
    /// Scan for Bluetooth devices.
    BluetoothScan,
    /// Advertise to nearby Bluetooth devices.
    BluetoothAdvertise,
    /// Use the vibrator.
    Vibrate,
    /// Draw over other apps.
    SystemAlertWindow,
    /// Schedule exact alarms.
    ScheduleExactAlarm,
}

impl Capability {
    /// Every known capability, in request order.
    pub const ALL: [Self; 29] = [
        Self::Internet,
        Self::AccessNetworkState,
        Self::AccessWifiState,
        Self::RecordAudio,
        Self::Camera,
        Self::ModifyAudioSettings,
        Self::ReadExternalStorage,
        Self::WriteExternalStorage,
        Self::ManageExternalStorage,
        Self::AccessFineLocation,
        Self::AccessCoarseLocation,
        Self::ForegroundService,
        Self::ReadContacts,
        Self::WriteContacts,
        Self::SendSms,
        Self::ReceiveSms,
        Self::ReadSms,
        Self::ReceiveMms,
        Self::CallPhone,
        Self::ReadPhoneState,
        Self::UseBiometric,
        Self::Bluetooth,
        Self::BluetoothAdmin,
        Self::BluetoothConnect,
        Self::BluetoothScan,
        Self::BluetoothAdvertise,
        Self::Vibrate,
        Self::SystemAlertWindow,
        Self::ScheduleExactAlarm,
    ];

    /// The identifier the platform permission store knows this capability by.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Internet => "android.permission.INTERNET",
            Self::AccessNetworkState => "android.permission.ACCESS_NETWORK_STATE",
            Self::AccessWifiState => "android.permission.ACCESS_WIFI_STATE",
            Self::RecordAudio => "android.permission.RECORD_AUDIO",
            Self::Camera => "android.permission.CAMERA",
            Self::ModifyAudioSettings => "android.permission.MODIFY_AUDIO_SETTINGS",
            Self::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            Self::WriteExternalStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
            Self::ManageExternalStorage => "android.permission.MANAGE_EXTERNAL_STORAGE",
            Self::AccessFineLocation => "android.permission.ACCESS_FINE_LOCATION",
            Self::AccessCoarseLocation => "android.permission.ACCESS_COARSE_LOCATION",
            Self::ForegroundService => "android.permission.FOREGROUND_SERVICE",
            Self::ReadContacts => "android.permission.READ_CONTACTS",
            Self::WriteContacts => "android.permission.WRITE_CONTACTS",
            Self::SendSms => "android.permission.SEND_SMS",
            Self::ReceiveSms => "android.permission.RECEIVE_SMS",
            Self::ReadSms => "android.permission.READ_SMS",
            Self::ReceiveMms => "android.permission.RECEIVE_MMS",
            Self::CallPhone => "android.permission.CALL_PHONE",
            Self::ReadPhoneState => "android.permission.READ_PHONE_STATE",
            Self::UseBiometric => "android.permission.USE_BIOMETRIC",
            Self::Bluetooth => "android.permission.BLUETOOTH",
            Self::BluetoothAdmin => "android.permission.BLUETOOTH_ADMIN",
            Self::BluetoothConnect => "android.permission.BLUETOOTH_CONNECT",
            Self::BluetoothScan => "android.permission.BLUETOOTH_SCAN",
            Self::BluetoothAdvertise => "android.permission.BLUETOOTH_ADVERTISE",
            Self::Vibrate => "android.permission.VIBRATE",
            Self::SystemAlertWindow => "android.permission.SYSTEM_ALERT_WINDOW",
            Self::ScheduleExactAlarm => "android.permission.SCHEDULE_EXACT_ALARM",
        }
    }

    /// Look a capability up by its platform identifier.
    #[must_use]
    pub fn from_manifest_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.manifest_name() == name)
    }

    /// Lowest platform API level on which the capability exists.
    #[must_use]
    pub const fn min_api_level(self) -> u32 {
        match self {
            Self::WriteExternalStorage => 4,
            Self::ReadExternalStorage => 16,
            Self::ForegroundService | Self::UseBiometric => 28,
            Self::ManageExternalStorage => 30,
            Self::BluetoothConnect
            | Self::BluetoothScan
            | Self::BluetoothAdvertise
            | Self::ScheduleExactAlarm => 31,
            _ => 1,
        }
    }

    /// Whether the capability applies on the given API level.
    ///
    /// `None` means the platform is not version-gated and every capability applies.
    #[must_use]
    pub fn applies_to(self, api_level: Option<u32>) -> bool {
        api_level.is_none_or(|level| level >= self.min_api_level())
    }
}

/// Which of the request lists the screen asks for.
///
/// Two versions of the screen exist: one requests everything the remote page
/// might touch, the other only what a video call needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityProfile {
    /// Network, media, storage, location, contacts, messaging, telephony,
    /// biometrics, Bluetooth, vibration, overlays and alarms.
    #[default]
    Full,
    /// Audio recording, camera and audio-settings modification.
    Reduced,
}

impl CapabilityProfile {
    /// Capabilities in this profile before any platform-version filtering.
    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Full => &Capability::ALL,
            Self::Reduced => &[
                Capability::RecordAudio,
                Capability::Camera,
                Capability::ModifyAudioSettings,
            ],
        }
    }
}

/// An immutable, ordered, duplicate-free list of capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: Vec<Capability>,
}

impl CapabilitySet {
    /// Build a set from any list, dropping duplicates but keeping first-seen order.
    pub fn new(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut unique = Vec::new();
        for capability in capabilities {
            if !unique.contains(&capability) {
                unique.push(capability);
            }
        }
        Self {
            capabilities: unique,
        }
    }

    /// The capabilities `profile` asks for on a platform at `api_level`.
    ///
    /// Entries newer than the platform are left out. `None` keeps everything.
    #[must_use]
    pub fn for_platform(profile: CapabilityProfile, api_level: Option<u32>) -> Self {
        Self::new(
            profile
                .capabilities()
                .iter()
                .copied()
                .filter(|c| c.applies_to(api_level)),
        )
    }

    /// Iterate over the capabilities in request order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    /// Whether `capability` is part of the set.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Number of capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// The capabilities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Capability] {
        &self.capabilities
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a CapabilitySet {
    type Item = Capability;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Capability>>;

    fn into_iter(self) -> Self::IntoIter {
        self.capabilities.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_profile_on_recent_platform_keeps_everything() {
        let set = CapabilitySet::for_platform(CapabilityProfile::Full, Some(34));
        assert_eq!(set.len(), Capability::ALL.len());
    }

    #[test]
    fn older_platform_drops_newer_capabilities() {
        let set = CapabilitySet::for_platform(CapabilityProfile::Full, Some(30));
        assert!(set.contains(Capability::ManageExternalStorage));
        assert!(!set.contains(Capability::BluetoothConnect));
        assert!(!set.contains(Capability::BluetoothScan));
        assert!(!set.contains(Capability::BluetoothAdvertise));
        assert!(!set.contains(Capability::ScheduleExactAlarm));

        let set = CapabilitySet::for_platform(CapabilityProfile::Full, Some(26));
        assert!(!set.contains(Capability::ForegroundService));
        assert!(!set.contains(Capability::UseBiometric));
        assert!(!set.contains(Capability::ManageExternalStorage));
        assert!(set.contains(Capability::Camera));
    }

    #[test]
    fn unversioned_platform_keeps_everything() {
        let set = CapabilitySet::for_platform(CapabilityProfile::Full, None);
        assert_eq!(set.as_slice(), &Capability::ALL);
    }

    #[test]
    fn reduced_profile_is_the_call_trio() {
        let set = CapabilitySet::for_platform(CapabilityProfile::Reduced, Some(21));
        assert_eq!(
            set.as_slice(),
            &[
                Capability::RecordAudio,
                Capability::Camera,
                Capability::ModifyAudioSettings
            ]
        );
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let set: CapabilitySet = [Capability::Camera, Capability::Vibrate, Capability::Camera]
            .into_iter()
            .collect();
        assert_eq!(set.as_slice(), &[Capability::Camera, Capability::Vibrate]);
    }

    #[test]
    fn manifest_names_resolve_back() {
        for capability in Capability::ALL {
            assert_eq!(
                Capability::from_manifest_name(capability.manifest_name()),
                Some(capability)
            );
        }
        assert_eq!(Capability::from_manifest_name("android.permission.NOPE"), None);
    }

    #[test]
    fn profile_names_in_config() {
        let profile: CapabilityProfile = serde_json::from_str("\"reduced\"").unwrap();
        assert_eq!(profile, CapabilityProfile::Reduced);
        assert_eq!(CapabilityProfile::default(), CapabilityProfile::Full);
    }
}
