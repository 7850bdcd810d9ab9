use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::path_matcher::PathMatcher;

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = "classref.json";

/// classref.json の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRefConfig {
    /// クラス名を収集するマークアップの拡張子
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    /// ディレクトリ初期化のトリガーとなるスタイルシートの拡張子
    #[serde(default = "default_stylesheet_extensions")]
    pub stylesheet_extensions: Vec<String>,
    /// クラス属性名の設定
    #[serde(default)]
    pub class_attribute: ClassAttributeConfig,
    /// 除外するファイル名のglobパターン
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// 方言ごとのクラス属性名
#[derive(Debug, Clone, Deserialize)]
pub struct ClassAttributeConfig {
    #[serde(default = "default_jsx_attribute")]
    pub jsx: String,
    #[serde(default = "default_html_attribute")]
    pub html: String,
}

fn default_markup_extensions() -> Vec<String> {
    vec!["tsx".to_string(), "jsx".to_string(), "html".to_string()]
}

fn default_stylesheet_extensions() -> Vec<String> {
    vec!["scss".to_string()]
}

fn default_jsx_attribute() -> String {
    "className".to_string()
}

fn default_html_attribute() -> String {
    "class".to_string()
}

impl Default for ClassAttributeConfig {
    fn default() -> Self {
        Self {
            jsx: default_jsx_attribute(),
            html: default_html_attribute(),
        }
    }
}

impl Default for ClassRefConfig {
    fn default() -> Self {
        Self {
            markup_extensions: default_markup_extensions(),
            stylesheet_extensions: default_stylesheet_extensions(),
            class_attribute: ClassAttributeConfig::default(),
            exclude: Vec::new(),
        }
    }
}

impl ClassRefConfig {
    /// 指定ディレクトリからclassref.jsonを読み込む
    pub fn load_from_dir(dir: &Path) -> Self {
        Self::load_from_path(&dir.join(CONFIG_FILE_NAME))
    }

    /// 指定パスからclassref.jsonを読み込む
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", CONFIG_FILE_NAME, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", CONFIG_FILE_NAME, e);
                Self::default()
            }
        }
    }

    /// PathMatcherを作成
    pub fn create_path_matcher(&self) -> Result<PathMatcher, String> {
        PathMatcher::new(&self.markup_extensions, &self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassRefConfig::default();
        assert_eq!(config.markup_extensions, vec!["tsx", "jsx", "html"]);
        assert_eq!(config.stylesheet_extensions, vec!["scss"]);
        assert_eq!(config.class_attribute.jsx, "className");
        assert_eq!(config.class_attribute.html, "class");
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "markupExtensions": ["tsx"],
            "classAttribute": { "jsx": "class" },
            "exclude": ["*.stories.tsx"]
        }"#;
        let config: ClassRefConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.markup_extensions, vec!["tsx"]);
        assert_eq!(config.stylesheet_extensions, vec!["scss"]);
        assert_eq!(config.class_attribute.jsx, "class");
        assert_eq!(config.class_attribute.html, "class");
        assert_eq!(config.exclude, vec!["*.stories.tsx"]);
    }

    #[test]
    fn test_empty_config() {
        let config: ClassRefConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.class_attribute.jsx, "className");
    }

    #[test]
    fn test_load_from_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClassRefConfig::load_from_dir(dir.path());
        assert_eq!(config.markup_extensions, vec!["tsx", "jsx", "html"]);
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let config = ClassRefConfig::load_from_dir(dir.path());
        assert_eq!(config.stylesheet_extensions, vec!["scss"]);
    }
}
