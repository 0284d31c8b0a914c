use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::error::{ClientError, Result};
use crate::gateway::ChannelId;

// Default configuration
pub const DEFAULT_GATEWAY: &str = "127.0.0.1:7878";
pub const DEFAULT_ACCOUNT: &str = "default";
pub const DEFAULT_TYPING_TIMEOUT_SECS: u64 = 10;
pub const MAX_TYPING_TIMEOUT_SECS: u64 = 3600;

const KEYRING_SERVICE: &str = "cordial";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// `host:port` of the gateway.
    pub gateway: String,
    pub use_tls: bool,
    /// Keyring entry holding the token.
    pub account: String,
    pub theme: String,
    pub show_member_list: bool,
    pub typing_timeout_secs: u64,
    pub last_channel: Option<ChannelId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway: DEFAULT_GATEWAY.to_string(),
            use_tls: false,
            account: DEFAULT_ACCOUNT.to_string(),
            theme: "dark".to_string(),
            show_member_list: true,
            typing_timeout_secs: DEFAULT_TYPING_TIMEOUT_SECS,
            last_channel: None,
        }
    }
}

impl Settings {
    pub fn typing_timeout(&self) -> Duration {
        Duration::from_secs(self.typing_timeout_secs.clamp(1, MAX_TYPING_TIMEOUT_SECS))
    }
}

/// Connection form state. The token only ever lives here and in the keyring.
#[derive(Clone, Debug, Default)]
pub struct ConnectionConfig {
    pub gateway: String,
    pub use_tls: bool,
    pub account: String,
    pub token: String,
}

impl ConnectionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            gateway: settings.gateway.clone(),
            use_tls: settings.use_tls,
            account: settings.account.clone(),
            token: load_token(&settings.account).unwrap_or_default(),
        }
    }

    /// Split `host:port`. A missing or bad port falls back to the default
    /// for the transport (443 with TLS, 7878 without).
    pub fn parse_gateway(&self) -> Result<(String, u16)> {
        let default_port = if self.use_tls { 443 } else { 7878 };
        let trimmed = self.gateway.trim();
        let (host, port) = match trimmed.rsplit_once(':') {
            Some((host, port)) => (host, port.parse().unwrap_or(default_port)),
            None => (trimmed, default_port),
        };
        if host.is_empty() {
            return Err(ClientError::Config(format!(
                "gateway address '{}' has no host",
                self.gateway
            )));
        }
        Ok((host.to_string(), port))
    }
}

pub fn settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("io", "cordial", "cordial")
        .ok_or_else(|| ClientError::Config("no home directory".into()))?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("settings.json"))
}

pub fn load_settings() -> Option<Settings> {
    let path = match settings_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("settings unavailable: {}", e);
            return None;
        }
    };
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!(path = %path.display(), "ignoring unreadable settings: {}", e);
            None
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = settings_path()?;
    let mut file = fs::File::create(path)?;
    let data = serde_json::to_string_pretty(settings)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

pub fn load_token(account: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account).ok()?;
    match entry.get_password() {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(account, "could not read token from keyring: {}", e);
            None
        }
    }
}

pub fn save_token(account: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
    entry.set_password(token)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"gateway":"chat.example.net:443","use_tls":true}"#).unwrap();
        assert_eq!(settings.gateway, "chat.example.net:443");
        assert!(settings.use_tls);
        assert_eq!(settings.theme, "dark");
        assert!(settings.show_member_list);
        assert_eq!(settings.typing_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let settings = Settings {
            typing_timeout_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.typing_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_timeout_is_clamped() {
        let settings: Settings = serde_json::from_str(r#"{"typing_timeout_secs":18446744073709551615}"#).unwrap();
        assert_eq!(settings.typing_timeout_secs, u64::MAX);
        assert_eq!(
            settings.typing_timeout(),
            Duration::from_secs(MAX_TYPING_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_settings_round_trip_keeps_last_channel() {
        let settings = Settings {
            last_channel: Some(ChannelId(100)),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""last_channel":"100""#));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_parse_gateway() {
        let mut conn = ConnectionConfig {
            gateway: "chat.example.net:9000".into(),
            ..ConnectionConfig::default()
        };
        assert_eq!(conn.parse_gateway().unwrap(), ("chat.example.net".into(), 9000));

        conn.gateway = "chat.example.net".into();
        assert_eq!(conn.parse_gateway().unwrap().1, 7878);
        conn.use_tls = true;
        assert_eq!(conn.parse_gateway().unwrap().1, 443);

        conn.gateway = ":9000".into();
        assert!(conn.parse_gateway().is_err());
    }
}
