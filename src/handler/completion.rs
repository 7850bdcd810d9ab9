use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tower_lsp::lsp_types::*;

use crate::index::Index;

pub struct CompletionHandler {
    index: Arc<Index>,
}

impl CompletionHandler {
    pub fn new(index: Arc<Index>) -> Self {
        Self { index }
    }

    /// まだスタイルシートで定義されていないクラス名を補完候補として返す
    ///
    /// ディレクトリ内の全マークアップのクラス名から、`path` のスタイルシートが
    /// 定義するクラス名を除いたもの。ディレクトリが未初期化なら空。
    pub fn complete(&self, path: &Path) -> Vec<CompletionItem> {
        let Some(entry) = self.index.entry_for(path) else {
            return Vec::new();
        };
        let defined = entry.selector_set(path);

        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::new();
        for occurrence in entry.occurrences() {
            if defined.is_some_and(|set| set.contains(&occurrence.class_name)) {
                continue;
            }
            let label = occurrence.label();
            if !seen.insert(label.clone()) {
                continue;
            }
            items.push(CompletionItem {
                label: label.clone(),
                kind: Some(CompletionItemKind::CLASS),
                data: Some(Value::String(label)),
                ..Default::default()
            });
        }
        items
    }

    pub fn completion(&self, params: CompletionParams) -> Option<CompletionResponse> {
        let uri = params.text_document_position.text_document.uri;
        let path = uri.to_file_path().ok()?;
        let items = self.complete(&path);
        if items.is_empty() {
            return None;
        }
        Some(CompletionResponse::Array(items))
    }

    /// `data` をそのまま `detail` に設定する
    pub fn resolve(&self, mut item: CompletionItem) -> CompletionItem {
        if let Some(Value::String(data)) = &item.data {
            item.detail = Some(data.clone());
        }
        item
    }
}
