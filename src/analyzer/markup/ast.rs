//! tree-sitterの構文木から必要なノードだけを抜き出した閉じたAST

use tree_sitter::Node;

use crate::analyzer::parser::{node_text, MarkupDialect};
use crate::model::Span;
use crate::util::byte_col_to_utf16;

/// マークアップ解析で扱うノード（文書順に並ぶ）
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    /// クラス属性。値ノードの生テキストと範囲
    ClassAttribute { value: String, span: Span },
    /// 文字列リテラルで初期化された`const`/`let`束縛
    StringBinding { name: String, value: String },
}

/// 構文木を深さ優先で辿り、文書順のノード列に変換する
pub fn lower(
    root: Node,
    source: &str,
    dialect: MarkupDialect,
    class_attribute: &str,
) -> Vec<MarkupNode> {
    let lines: Vec<&str> = source.split('\n').collect();
    let ctx = LowerContext {
        source,
        lines: &lines,
        dialect,
        class_attribute,
    };
    let mut nodes = Vec::new();
    ctx.lower_recursive(root, &mut nodes);
    nodes
}

struct LowerContext<'a> {
    source: &'a str,
    lines: &'a [&'a str],
    dialect: MarkupDialect,
    class_attribute: &'a str,
}

impl LowerContext<'_> {
    fn lower_recursive(&self, node: Node, out: &mut Vec<MarkupNode>) {
        let lowered = match (self.dialect, node.kind()) {
            (MarkupDialect::Tsx | MarkupDialect::Jsx, "jsx_attribute") => {
                self.lower_jsx_attribute(node)
            }
            (MarkupDialect::Tsx | MarkupDialect::Jsx, "variable_declarator") => {
                self.lower_string_binding(node)
            }
            (MarkupDialect::Html, "attribute") => self.lower_html_attribute(node),
            _ => None,
        };
        if let Some(lowered) = lowered {
            out.push(lowered);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.lower_recursive(child, out);
        }
    }

    /// `className=...` を抽出
    fn lower_jsx_attribute(&self, node: Node) -> Option<MarkupNode> {
        let mut cursor = node.walk();
        let named: Vec<Node> = node.named_children(&mut cursor).collect();
        let name = named.first()?;
        if node_text(*name, self.source) != self.class_attribute {
            return None;
        }
        // 値のない属性（`<div className />`）は対象外
        let value = named.get(1)?;
        Some(self.class_attribute_node(*value))
    }

    /// `class="..."` を抽出
    fn lower_html_attribute(&self, node: Node) -> Option<MarkupNode> {
        let mut cursor = node.walk();
        let mut name_matches = false;
        let mut value = None;
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "attribute_name" => {
                    name_matches = node_text(child, self.source) == self.class_attribute;
                }
                "quoted_attribute_value" | "attribute_value" => value = Some(child),
                _ => {}
            }
        }
        if !name_matches {
            return None;
        }
        value.map(|v| self.class_attribute_node(v))
    }

    /// `const name = "literal"` / `let name = 'literal'` を抽出
    fn lower_string_binding(&self, node: Node) -> Option<MarkupNode> {
        let parent = node.parent()?;
        if parent.kind() != "lexical_declaration" {
            return None;
        }
        let name = node.child_by_field_name("name")?;
        if name.kind() != "identifier" {
            return None;
        }
        let value = node.child_by_field_name("value")?;
        if value.kind() != "string" {
            return None;
        }
        Some(MarkupNode::StringBinding {
            name: node_text(name, self.source).to_string(),
            value: strip_string_delimiters(node_text(value, self.source)).to_string(),
        })
    }

    fn class_attribute_node(&self, value: Node) -> MarkupNode {
        MarkupNode::ClassAttribute {
            value: node_text(value, self.source).to_string(),
            span: self.span_of(value),
        }
    }

    /// tree-sitterのバイト列位置をUTF-16列に変換したSpan
    fn span_of(&self, node: Node) -> Span {
        let start = node.start_position();
        let end = node.end_position();
        let col = |row: usize, byte_col: usize| {
            self.lines
                .get(row)
                .map(|line| byte_col_to_utf16(line, byte_col))
                .unwrap_or(byte_col as u32)
        };
        Span::new(
            start.row as u32,
            col(start.row, start.column),
            end.row as u32,
            col(end.row, end.column),
        )
    }
}

fn strip_string_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close && text.len() >= 2 => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}
