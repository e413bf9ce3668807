use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{KoshError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub user_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_months_of_history")]
    pub months_of_history: u32,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_months_of_history() -> u32 {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            currency: default_currency(),
            months_of_history: default_months_of_history(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("kosh")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| KoshError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            user_name: "Priya".to_string(),
            currency: "INR".to_string(),
            months_of_history: 12,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.user_name, "Priya");
        assert_eq!(loaded.months_of_history, 12);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.user_name.is_empty());
        assert_eq!(s.currency, "INR");
        assert_eq!(s.months_of_history, 6);
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"user_name": "Arjun"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.user_name, "Arjun");
        assert_eq!(s.currency, "INR");
        assert_eq!(s.months_of_history, 6);
    }
}
