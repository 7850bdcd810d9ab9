use std::path::Path;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::AnalyzerError;
use crate::util::extension_of;

/// マークアップの方言
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkupDialect {
    Tsx,
    Jsx,
    Html,
}

impl MarkupDialect {
    /// 拡張子から方言を判定
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension_of(path)?.as_str() {
            "tsx" => Some(Self::Tsx),
            "jsx" | "js" => Some(Self::Jsx),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::Html => tree_sitter_html::LANGUAGE.into(),
        }
    }
}

pub struct MarkupParser {
    parser: Parser,
}

impl MarkupParser {
    pub fn new(dialect: MarkupDialect) -> Result<Self, AnalyzerError> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.tree_sitter_language())
            .map_err(|e| AnalyzerError::Language(format!("{:?}: {}", dialect, e)))?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        self.parser.parse(source, None)
    }
}

pub struct StyleParser {
    parser: Parser,
}

impl StyleParser {
    pub fn new() -> Result<Self, AnalyzerError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_scss::language().into())
            .map_err(|e| AnalyzerError::Language(format!("scss: {}", e)))?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        self.parser.parse(source, None)
    }
}

/// 最初に見つかったエラーノードの位置（0始まりの行, 列）
pub fn first_error_position(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row, pos.column));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(pos) = first_error_position(child) {
            return Some(pos);
        }
    }
    None
}

/// ノードのテキストを取得
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}
