use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::{log_info, log_warning};

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone, PartialEq)]
pub struct BingoConfig {
    pub photo_dir: PathBuf,
    pub priority_folder: Option<String>,
    pub day_pool_size: usize,
    pub players: usize,
    pub daily_seed: bool,
    pub verify_images: bool,
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            photo_dir: PathBuf::from("."),
            priority_folder: Some("priority".to_string()),
            day_pool_size: 15,
            players: 35,
            daily_seed: true,
            verify_images: true,
        }
    }
}

impl BingoConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config_map = parse_config(&content)?;
        Ok(Self::from_map(&config_map))
    }

    fn from_map(config_map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let photo_dir = config_map.get("photo_dir")
            .map(PathBuf::from)
            .unwrap_or(defaults.photo_dir);

        // An empty value disables the priority folder
        let priority_folder = match config_map.get("priority_folder") {
            Some(folder) if folder.is_empty() => None,
            Some(folder) => Some(folder.clone()),
            None => defaults.priority_folder,
        };

        let day_pool_size = config_map.get("day_pool_size")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.day_pool_size);

        let players = config_map.get("players")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(defaults.players);

        let daily_seed = config_map.get("daily_seed")
            .and_then(|b| parse_bool(b))
            .unwrap_or(defaults.daily_seed);

        let verify_images = config_map.get("verify_images")
            .and_then(|b| parse_bool(b))
            .unwrap_or(defaults.verify_images);

        BingoConfig { photo_dir, priority_folder, day_pool_size, players, daily_seed, verify_images }
    }

    pub fn load_or_default() -> Self {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let config_path = path.as_ref();

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load config from {}: {}. Using defaults.", config_path.display(), e));
                Self::default()
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse key = value pairs
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim().to_string();
            let value = value.trim().to_string();
            config.insert(key, value);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let content = r#"
            # This is a comment
            photo_dir = /srv/photos
            players = 12
            # Another comment
            daily_seed = no
        "#;

        let config = parse_config(content).unwrap();
        assert_eq!(config.get("photo_dir"), Some(&"/srv/photos".to_string()));
        assert_eq!(config.get("players"), Some(&"12".to_string()));
        assert_eq!(config.get("daily_seed"), Some(&"no".to_string()));
    }

    #[test]
    fn test_config_default() {
        let config = BingoConfig::default();
        assert_eq!(config.photo_dir, PathBuf::from("."));
        assert_eq!(config.priority_folder.as_deref(), Some("priority"));
        assert_eq!(config.day_pool_size, 15);
        assert_eq!(config.players, 35);
        assert!(config.daily_seed);
        assert!(config.verify_images);
    }

    #[test]
    fn test_config_from_map_overrides_and_fallbacks() {
        let content = "photo_dir = pics\npriority_folder =\nday_pool_size = twenty\ndaily_seed = off\n";
        let config = BingoConfig::from_map(&parse_config(content).unwrap());
        assert_eq!(config.photo_dir, PathBuf::from("pics"));
        assert_eq!(config.priority_folder, None);
        // unparsable value falls back to the default
        assert_eq!(config.day_pool_size, 15);
        assert!(!config.daily_seed);
        assert!(config.verify_images);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = BingoConfig::load_from_or_default("conf/does-not-exist.conf");
        assert_eq!(config, BingoConfig::default());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
