use serde::{Deserialize, Serialize};
use shopfront_editor::DEFAULT_ACTIVATION_DISTANCE;
use shopfront_model::Language;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "shopfront.config.json";

/// Builder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Shop whose layouts are edited
    #[serde(default = "default_shop_id")]
    pub shop_id: String,

    /// Language shown when the editor opens
    #[serde(default)]
    pub default_language: Language,

    /// Undo history depth (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,

    /// Page type whose active layout is opened when no layout id is given
    #[serde(default = "default_home_page_type")]
    pub home_page_type: String,

    /// Prefix for generated ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Pointer travel in px before a press becomes a drag
    #[serde(default = "default_drag_activation_distance")]
    pub drag_activation_distance: f64,
}

fn default_shop_id() -> String {
    "default".to_string()
}

fn default_undo_levels() -> usize {
    100
}

fn default_home_page_type() -> String {
    "home".to_string()
}

fn default_id_prefix() -> String {
    "node".to_string()
}

fn default_drag_activation_distance() -> f64 {
    DEFAULT_ACTIVATION_DISTANCE
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            shop_id: default_shop_id(),
            default_language: Language::default(),
            undo_levels: default_undo_levels(),
            home_page_type: default_home_page_type(),
            id_prefix: default_id_prefix(),
            drag_activation_distance: default_drag_activation_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "shopId": "shop-42",
            "defaultLanguage": "uz",
            "undoLevels": 20,
            "homePageType": "landing"
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shop_id, "shop-42");
        assert_eq!(config.default_language, Language::Uz);
        assert_eq!(config.undo_levels, 20);
        assert_eq!(config.home_page_type, "landing");
        assert_eq!(config.id_prefix, "node");
        assert_eq!(config.drag_activation_distance, 5.0);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.shop_id, "default");
        assert_eq!(config.default_language, Language::Ru);
        assert_eq!(config.undo_levels, 100);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        assert_eq!(EditorConfig::load(cwd).unwrap(), EditorConfig::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "shopId": "s1" }"#).unwrap();
        assert_eq!(EditorConfig::load(cwd).unwrap().shop_id, "s1");

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(EditorConfig::load(cwd).is_err());
    }
}
