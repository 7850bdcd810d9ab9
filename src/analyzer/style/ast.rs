//! SCSSの構文木をルール・変数・セレクタだけの閉じたASTに変換する

use tree_sitter::Node;

use crate::analyzer::parser::node_text;

/// スタイルシート解析で扱うノード
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleNode {
    /// `$name: value;`
    Variable { name: String, value: String },
    /// セレクタリストとネストしたブロック
    Rule {
        selectors: Vec<Selector>,
        children: Vec<StyleNode>,
    },
}

/// カンマ区切りのセレクタ1つ分
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// `&` を含まないセレクタ
    Class(String),
    /// `&` で親セレクタを参照するセレクタ（`&-header`, `&.active` など）
    ParentCombinator(String),
}

impl Selector {
    pub fn from_raw(raw: &str) -> Self {
        if raw.contains('&') {
            Self::ParentCombinator(raw.to_string())
        } else {
            Self::Class(raw.to_string())
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::Class(raw) | Self::ParentCombinator(raw) => raw,
        }
    }
}

/// ノードの子を文書順にASTへ変換する
pub fn lower(node: Node, source: &str) -> Vec<StyleNode> {
    let mut nodes = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        lower_recursive(child, source, &mut nodes);
    }
    nodes
}

fn lower_recursive(node: Node, source: &str, out: &mut Vec<StyleNode>) {
    match node.kind() {
        "rule_set" => {
            let mut selectors = Vec::new();
            let mut children = Vec::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "selectors" => {
                        selectors = split_selector_list(node_text(child, source))
                            .iter()
                            .map(|raw| Selector::from_raw(raw))
                            .collect();
                    }
                    "block" => children = lower(child, source),
                    _ => {}
                }
            }
            out.push(StyleNode::Rule {
                selectors,
                children,
            });
        }
        "declaration" => {
            if let Some(variable) = lower_variable_declaration(node, source) {
                out.push(variable);
            }
        }
        // `@media` などのブロック内のルールは同じ階層のものとして扱う
        "media_statement" | "supports_statement" | "at_rule" | "block" | "ERROR" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                lower_recursive(child, source, out);
            }
        }
        // mixin/includeの引数や関数本体の変数はグローバルな変数ではない
        _ => {}
    }
}

/// 先頭が `$name` の宣言ノードだけを変数宣言として扱う
fn lower_variable_declaration(node: Node, source: &str) -> Option<StyleNode> {
    let mut cursor = node.walk();
    let name = node.named_children(&mut cursor).next()?;
    if !node_text(name, source).starts_with('$') {
        return None;
    }
    parse_variable_declaration(node_text(node, source))
}

/// `$name: value !default;` を解析する
pub fn parse_variable_declaration(text: &str) -> Option<StyleNode> {
    let text = text.trim();
    if !text.starts_with('$') {
        return None;
    }
    let (name, value) = text.split_once(':')?;
    let name = name.trim();
    if name.len() < 2 || name.contains(char::is_whitespace) {
        return None;
    }

    let mut value = value.trim().trim_end_matches(';').trim();
    for flag in ["!default", "!global"] {
        if let Some(stripped) = value.strip_suffix(flag) {
            value = stripped.trim_end();
        }
    }
    let value = strip_quotes(value);

    Some(StyleNode::Variable {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// トップレベルのカンマでセレクタリストを分割する（括弧内と`#{}`内は分割しない）
pub fn split_selector_list(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in text.chars() {
        match ch {
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_selector(&mut parts, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    push_selector(&mut parts, &current);
    parts
}

fn push_selector(parts: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        parts.push(normalized);
    }
}
