//! スタイルシート（SCSS）が定義するクラス名を抽出するモジュール

pub mod ast;
pub mod resolve;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::error::AnalyzerError;
use crate::model::SelectorSet;

use super::parser::StyleParser;
use resolve::StyleScratch;

/// スタイルシートのセレクタインデクサー
#[derive(Clone, Debug, Default)]
pub struct StyleIndexer;

impl StyleIndexer {
    pub fn new() -> Self {
        Self
    }

    /// スタイルシートを解析し、定義済みクラス名の集合を返す
    ///
    /// tree-sitterはエラーを含んでも木を返すため、パース結果が無い場合のみ失敗とする。
    pub fn index(&self, file: &Path, source: &str) -> Result<SelectorSet, AnalyzerError> {
        let mut parser = StyleParser::new()?;
        let tree = parser.parse(source).ok_or_else(|| AnalyzerError::Parse {
            file: file.display().to_string(),
            reason: "parser returned no tree".to_string(),
        })?;

        let nodes = ast::lower(tree.root_node(), source);
        let scratch = resolve::resolve_nodes(&nodes, None, StyleScratch::default());
        Ok(scratch.into_selector_set())
    }
}
