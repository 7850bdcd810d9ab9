//! クラス属性値の解決（引用符除去、`${...}`置換、テンプレートリテラル展開）

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::ClassOccurrence;

use super::ast::MarkupNode;

/// 引用符で囲まれた英数字だけのトークン（`"foo"` / `'foo'`）
static QUOTED_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:"(\w+)"|'(\w+)')$"#).unwrap());

/// `${identifier}` プレースホルダー
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\s*([A-Za-z_$][\w$]*)\s*\}").unwrap());

/// 単一のテンプレートリテラルだけを含む式コンテナ（``{`...`}``）
static TEMPLATE_CONTAINER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\s*`([^`]*)`\s*\}$").unwrap());

/// 属性値テキストの断片
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder { name: &'a str, raw: &'a str },
}

/// 走査中に持ち回るアキュムレータ
#[derive(Debug, Default)]
pub struct MarkupAccumulator {
    /// これまでに見た文字列束縛（識別子 -> 値）
    bindings: HashMap<String, String>,
    occurrences: Vec<ClassOccurrence>,
}

impl MarkupAccumulator {
    pub fn into_occurrences(self) -> Vec<ClassOccurrence> {
        self.occurrences
    }
}

/// 文書順のノード列を畳み込み、クラス名の出現リストを作る
pub fn resolve_nodes(nodes: &[MarkupNode], file: &Path) -> Vec<ClassOccurrence> {
    nodes
        .iter()
        .fold(MarkupAccumulator::default(), |acc, node| {
            resolve_node(acc, node, file)
        })
        .into_occurrences()
}

fn resolve_node(mut acc: MarkupAccumulator, node: &MarkupNode, file: &Path) -> MarkupAccumulator {
    match node {
        MarkupNode::StringBinding { name, value } => {
            acc.bindings.insert(name.clone(), value.clone());
        }
        MarkupNode::ClassAttribute { value, span } => {
            let class_name = resolve_class_value(value, &acc.bindings);
            acc.occurrences.push(ClassOccurrence {
                class_name,
                origin_text: value.clone(),
                file: file.to_path_buf(),
                span: *span,
            });
        }
    }
    acc
}

/// 属性値の生テキストからクラス名を解決する
pub fn resolve_class_value(raw: &str, bindings: &HashMap<String, String>) -> String {
    let stripped = strip_quotes(raw);
    let substituted = substitute_placeholders(stripped, bindings);
    unwrap_template_container(&substituted).to_string()
}

/// 値全体が引用符付きの単一トークンの場合のみ引用符を外す
pub fn strip_quotes(raw: &str) -> &str {
    match QUOTED_TOKEN_RE.captures(raw) {
        Some(caps) => caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or(raw),
        None => raw,
    }
}

/// 既知の束縛で `${name}` を置換する。未解決のものはそのまま残す
pub fn substitute_placeholders(text: &str, bindings: &HashMap<String, String>) -> String {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(s) => s,
            Segment::Placeholder { name, raw } => {
                bindings.get(name).map(String::as_str).unwrap_or(raw)
            }
        })
        .collect()
}

/// ``{`...`}`` を内側のテキストに展開する
pub fn unwrap_template_container(text: &str) -> &str {
    TEMPLATE_CONTAINER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut last = 0;
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            result.push(Segment::Literal(&text[last..whole.start()]));
        }
        result.push(Segment::Placeholder {
            name: name.as_str(),
            raw: whole.as_str(),
        });
        last = whole.end();
    }
    if last < text.len() {
        result.push(Segment::Literal(&text[last..]));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"foo\""), "foo");
        assert_eq!(strip_quotes("'foo'"), "foo");
        assert_eq!(strip_quotes("\"btn_2\""), "btn_2");
        // `-` を含むもの、複数クラス、式コンテナはそのまま
        assert_eq!(strip_quotes("\"btn-primary\""), "\"btn-primary\"");
        assert_eq!(strip_quotes("\"a b\""), "\"a b\"");
        assert_eq!(strip_quotes("{styles.a}"), "{styles.a}");
        assert_eq!(strip_quotes("\"foo'"), "\"foo'");
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("btn-${size}-x"),
            vec![
                Segment::Literal("btn-"),
                Segment::Placeholder {
                    name: "size",
                    raw: "${size}"
                },
                Segment::Literal("-x"),
            ]
        );
        assert_eq!(segments("plain"), vec![Segment::Literal("plain")]);
    }

    #[test]
    fn test_substitute_known_and_unknown() {
        let b = bindings(&[("size", "lg")]);
        assert_eq!(substitute_placeholders("btn-${size}", &b), "btn-lg");
        assert_eq!(
            substitute_placeholders("${tone}-${size}", &b),
            "${tone}-lg"
        );
    }

    #[test]
    fn test_unwrap_template_container() {
        assert_eq!(unwrap_template_container("{`btn-lg`}"), "btn-lg");
        assert_eq!(unwrap_template_container("{ `btn-lg` }"), "btn-lg");
        assert_eq!(unwrap_template_container("{styles.a}"), "{styles.a}");
        assert_eq!(unwrap_template_container("btn"), "btn");
    }

    #[test]
    fn test_resolve_class_value() {
        let b = bindings(&[("size", "lg")]);
        assert_eq!(resolve_class_value("{`btn-${size}`}", &b), "btn-lg");
        assert_eq!(
            resolve_class_value("{`btn-${size}`}", &HashMap::new()),
            "btn-${size}"
        );
        assert_eq!(resolve_class_value("\"card\"", &b), "card");
    }

    #[test]
    fn test_binding_order_matters() {
        use crate::model::Span;

        let nodes = vec![
            MarkupNode::ClassAttribute {
                value: "{`a-${v}`}".to_string(),
                span: Span::default(),
            },
            MarkupNode::StringBinding {
                name: "v".to_string(),
                value: "x".to_string(),
            },
            MarkupNode::ClassAttribute {
                value: "{`a-${v}`}".to_string(),
                span: Span::default(),
            },
        ];
        let occurrences = resolve_nodes(&nodes, Path::new("/p/A.tsx"));
        let names: Vec<&str> = occurrences.iter().map(|o| o.class_name.as_str()).collect();
        assert_eq!(names, vec!["a-${v}", "a-x"]);
        assert_eq!(occurrences[0].origin_text, "{`a-${v}`}");
    }
}
