// Appliance payload models
//
// Shapes of the `data` field for each route, and of the request bodies.
// Field names follow the appliance's JSON exactly, including its mixed casing
// (`SSID`, `Enable`, `vcc_state`). Config models keep unknown fields in
// `extra` and skip absent ones, so a payload read from the appliance can be
// edited and posted back without losing anything.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// ── Devices ──────────────────────────────────────────────────────────

/// A network interface as reported by `GET /api/devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetDevice {
    #[serde(default)]
    pub up: bool,
    pub device: String,
    #[serde(default)]
    pub connection_uuid: String,
    #[serde(default, rename = "type")]
    pub device_type: String,
    /// NetworkManager state, e.g. `"connected"`, `"disconnected"`.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub hardware_addr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ipv4_gateway: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv6: Vec<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ipv6_gateway: Option<String>,
}

// ── Wi-Fi access points ──────────────────────────────────────────────

/// A visible access point from `GET /api/wifi?device=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiAp {
    #[serde(default, rename = "SSID", skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, rename = "BSSID", skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    /// Signal strength, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub security: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub device: String,
    /// Set when a saved connection profile matches this AP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_uuid: Option<String>,
}

/// Body of `POST /api/wifi`.
///
/// Either connects `device` to a new AP (by SSID *or* BSSID), or, when
/// `connection_uuid` is set, brings a saved connection up or down.
#[derive(Debug, Clone, Serialize)]
pub struct WifiApSetting {
    #[serde(rename = "SSID", skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(rename = "BSSID", skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    pub hidden: bool,
    pub device: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "expose_optional"
    )]
    pub password: Option<SecretString>,
    /// WEP key type `"0"`, `"1"` or `"2"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wep_key_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_uuid: Option<String>,
    pub active: bool,
}

impl WifiApSetting {
    /// Connect `device` to the AP broadcasting `ssid`.
    pub fn connect_ssid(device: impl Into<String>, ssid: impl Into<String>) -> Self {
        Self {
            ssid: Some(ssid.into()),
            ..Self::empty(device.into())
        }
    }

    /// Connect `device` to the AP with hardware address `bssid`.
    pub fn connect_bssid(device: impl Into<String>, bssid: impl Into<String>) -> Self {
        Self {
            bssid: Some(bssid.into()),
            ..Self::empty(device.into())
        }
    }

    /// Bring the saved connection `connection_uuid` up (`active`) or down.
    pub fn toggle(connection_uuid: impl Into<String>, active: bool) -> Self {
        Self {
            connection_uuid: Some(connection_uuid.into()),
            active,
            ..Self::empty(String::new())
        }
    }

    pub fn with_password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_wep_key_type(mut self, key_type: impl Into<String>) -> Self {
        self.wep_key_type = Some(key_type.into());
        self
    }

    fn empty(device: String) -> Self {
        Self {
            ssid: None,
            bssid: None,
            hidden: false,
            device,
            password: None,
            wep_key_type: None,
            connection_uuid: None,
            active: false,
        }
    }

    /// Reject a setting that names both an SSID and a BSSID.
    ///
    /// The remaining field rules (password length, WEP key type, MAC and
    /// UUID syntax) are enforced by the appliance itself.
    pub fn validate(&self) -> Result<(), Error> {
        if self.connection_uuid.is_some() {
            return Ok(());
        }
        let named = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        if named(&self.ssid) && named(&self.bssid) {
            return Err(Error::InvalidRequest(
                "SSID and BSSID cannot be set at the same time".into(),
            ));
        }
        Ok(())
    }
}

// ── Hardware configuration ───────────────────────────────────────────

/// Fan channel settings, `GET`/`POST /api/fan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FanConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    /// PWM pin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u8>,
    /// Duty cycle, 1-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// SH1106 OLED display settings, `GET`/`POST /api/display`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default, rename = "Enable", skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    /// I2C bus number.
    #[serde(default, rename = "Bus", skip_serializing_if = "Option::is_none")]
    pub bus: Option<u8>,
    /// I2C address.
    #[serde(default, rename = "Addr", skip_serializing_if = "Option::is_none")]
    pub addr: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// 0 = external VCC, 1 = switch-cap VCC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcc_state: Option<u8>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Access-point-mode Wi-Fi settings, `GET`/`POST /api/wifi/config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    /// GPIO pin of the mode switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Login ────────────────────────────────────────────────────────────

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub user: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl LoginCredentials {
    pub fn new(user: impl Into<String>, password: SecretString) -> Self {
        Self {
            user: user.into(),
            password,
        }
    }
}

/// Console login settings as read from `GET /api/login_setting`.
///
/// The appliance never returns the password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSetting {
    #[serde(default)]
    pub user: String,
    /// Session cookie lifetime, in seconds.
    #[serde(default)]
    pub max_age: i64,
}

/// Body of `POST /api/login_setting`.
///
/// An empty `user` disables console login. A `max_age` of 0 keeps the
/// current cookie lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct LoginSettingUpdate {
    pub user: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub max_age: i64,
}

impl LoginSettingUpdate {
    pub fn new(user: impl Into<String>, password: SecretString) -> Self {
        Self {
            user: user.into(),
            password,
            max_age: 0,
        }
    }

    /// Turn console login off.
    pub fn disable() -> Self {
        Self::new(String::new(), SecretString::from(String::new()))
    }

    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }
}

// ── Serde helpers ────────────────────────────────────────────────────

fn expose<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(secret.expose_secret())
}

fn expose_optional<S: Serializer>(secret: &Option<SecretString>, s: S) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => s.serialize_str(secret.expose_secret()),
        None => s.serialize_none(),
    }
}

/// The appliance encodes empty lists as `null`.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// The appliance encodes a missing address as `""`.
fn empty_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.is_empty()))
}
