//! 変数と親セレクタ参照（`&`）を上から順に解決する

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::SelectorSet;

use super::ast::{Selector, StyleNode};

/// セレクタ内の `#{$name}` 補間
static INTERPOLATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\{\s*(\$[\w-]+)\s*\}").unwrap());

/// 変数値内の `$name` 参照
static VARIABLE_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$[\w-]+").unwrap());

/// 解決済みセレクタからクラス名を取り出す（未解決の補間は残す）
static CLASS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.((?:[\w-]|#\{[^}]*\})+)").unwrap());

/// 解析中だけ使うスクラッチ領域。走査関数の間で受け渡し、最後にSelectorSetへ変換する
#[derive(Debug, Default)]
pub struct StyleScratch {
    /// 変数名（`$`付き） -> 値
    variables: HashMap<String, String>,
    /// セレクタの生テキスト -> 解決済みセレクタ
    selectors: HashMap<String, Vec<String>>,
    /// これまでに解決したクラス名
    defined: SelectorSet,
}

impl StyleScratch {
    pub fn into_selector_set(self) -> SelectorSet {
        self.defined
    }

    fn record_variable(&mut self, name: &str, value: &str) {
        let resolved = VARIABLE_REF_RE
            .replace_all(value, |caps: &regex::Captures| {
                let reference = &caps[0];
                self.variables
                    .get(reference)
                    .cloned()
                    .unwrap_or_else(|| reference.to_string())
            })
            .into_owned();
        self.variables.insert(name.to_string(), resolved);
    }

    fn interpolate(&self, raw: &str) -> String {
        INTERPOLATION_RE
            .replace_all(raw, |caps: &regex::Captures| {
                self.variables
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// 親ルールのセレクタリストを解決済みの値に展開する
    fn parent_values(&self, parent: Option<&[Selector]>) -> Vec<String> {
        parent
            .unwrap_or_default()
            .iter()
            .filter_map(|selector| self.selectors.get(selector.raw()))
            .flatten()
            .cloned()
            .collect()
    }

    fn record_selector(&mut self, selector: &Selector, parent: Option<&[Selector]>) {
        let resolved = match selector {
            Selector::Class(raw) => vec![self.interpolate(raw)],
            Selector::ParentCombinator(raw) => {
                let parents = self.parent_values(parent);
                if parents.is_empty() {
                    // 親が無い場合は `&` を残したまま保存する
                    vec![self.interpolate(raw)]
                } else {
                    parents
                        .iter()
                        .map(|p| self.interpolate(&raw.replace('&', p)))
                        .collect()
                }
            }
        };

        for value in &resolved {
            for caps in CLASS_NAME_RE.captures_iter(value) {
                self.defined.insert(&caps[1]);
            }
        }
        self.selectors.insert(selector.raw().to_string(), resolved);
    }
}

/// ASTを深さ優先で辿り、スクラッチを受け取って返す
pub fn resolve_nodes(
    nodes: &[StyleNode],
    parent: Option<&[Selector]>,
    scratch: StyleScratch,
) -> StyleScratch {
    nodes.iter().fold(scratch, |mut scratch, node| match node {
        StyleNode::Variable { name, value } => {
            scratch.record_variable(name, value);
            scratch
        }
        StyleNode::Rule {
            selectors,
            children,
        } => {
            for selector in selectors {
                scratch.record_selector(selector, parent);
            }
            resolve_nodes(children, Some(selectors.as_slice()), scratch)
        }
    })
}
