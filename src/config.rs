use crate::error::Result;
use crate::types::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// `<config_dir>/deepparser/config.json`
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("deepparser").join("config.json")
}

/// Load settings, falling back to defaults if the file is missing or unreadable.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Config::default()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read settings");
            Config::default()
        }
    }
}

/// Persist settings, creating the parent directory if needed.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Model;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.starfield_speed, 0.5);
        assert!(!config.starfield_enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"model":"Qwen"}"#).unwrap();
        assert_eq!(config.model, Model::Qwen);
        assert_eq!(config.starfield_speed, 0.5);
        assert_eq!(config.last_export_dir, None);
    }

    #[test]
    fn save_then_load() {
        // nested so save_config has to create the parent directory
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deepparser").join("config.json");
        let config = Config {
            starfield_enabled: true,
            starfield_speed: -1.25,
            model: Model::Qwen,
            last_export_dir: Some("/tmp/out".into()),
        };
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path), config);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"starfieldEnabled\": true"));
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert_eq!(load_config(file.path()), Config::default());
    }
}
