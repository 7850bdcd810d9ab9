//! マークアップ（TSX/JSX/HTML）からクラス名の出現を抽出するモジュール

pub mod ast;
pub mod resolve;


use std::path::Path;

use crate::config::ClassAttributeConfig;
use crate::error::AnalyzerError;
use crate::model::ClassOccurrence;

use super::parser::{first_error_position, MarkupDialect, MarkupParser};

/// マークアップファイルのクラス名インデクサー
///
/// 状態を持たない純粋関数として振る舞う。パーサーは呼び出しごとに生成する。
#[derive(Clone, Debug)]
pub struct MarkupIndexer {
    jsx_attribute: String,
    html_attribute: String,
}

impl MarkupIndexer {
    pub fn new(config: &ClassAttributeConfig) -> Self {
        Self {
            jsx_attribute: config.jsx.clone(),
            html_attribute: config.html.clone(),
        }
    }

    fn class_attribute(&self, dialect: MarkupDialect) -> &str {
        match dialect {
            MarkupDialect::Tsx | MarkupDialect::Jsx => &self.jsx_attribute,
            MarkupDialect::Html => &self.html_attribute,
        }
    }

    /// ファイルを解析し、文書順のクラス名出現リストを返す
    pub fn index(&self, file: &Path, source: &str) -> Result<Vec<ClassOccurrence>, AnalyzerError> {
        let file_name = file.display().to_string();
        let dialect = MarkupDialect::from_path(file).ok_or_else(|| AnalyzerError::Parse {
            file: file_name.clone(),
            reason: "unsupported markup dialect".to_string(),
        })?;

        let mut parser = MarkupParser::new(dialect)?;
        let tree = parser.parse(source).ok_or_else(|| AnalyzerError::Parse {
            file: file_name.clone(),
            reason: "parser returned no tree".to_string(),
        })?;

        let root = tree.root_node();
        if let Some((row, col)) = first_error_position(root) {
            return Err(AnalyzerError::Parse {
                file: file_name,
                reason: format!("syntax error at {}:{}", row + 1, col + 1),
            });
        }

        let nodes = ast::lower(root, source, dialect, self.class_attribute(dialect));
        Ok(resolve::resolve_nodes(&nodes, file))
    }
}

impl Default for MarkupIndexer {
    fn default() -> Self {
        Self::new(&ClassAttributeConfig::default())
    }
}
