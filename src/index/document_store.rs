use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::debug;

use crate::model::Span;
use crate::util::utf16_col_to_byte;

/// ドキュメントへの変更（全文置換または範囲置換）
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentChange {
    Full(String),
    Incremental { span: Span, text: String },
}

/// ファイルごとの現在のテキストを保持するストア
///
/// 一度登録されたファイルはプロセス終了まで保持する。
pub struct DocumentStore {
    docs: DashMap<PathBuf, String>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// テキストを上書き登録
    pub fn insert(&self, path: PathBuf, text: String) {
        self.docs.insert(path, text);
    }

    pub fn has(&self, path: &Path) -> bool {
        self.docs.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.docs.get(path).map(|doc| doc.value().clone())
    }

    /// 変更を受信順に適用する。未登録のパスは何もしない
    pub fn apply_change(&self, path: &Path, changes: &[ContentChange]) -> bool {
        let Some(mut doc) = self.docs.get_mut(path) else {
            debug!("apply_change: unknown document {}", path.display());
            return false;
        };
        for change in changes {
            apply_one(doc.value_mut(), change);
        }
        true
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_one(text: &mut String, change: &ContentChange) {
    match change {
        ContentChange::Full(new_text) => {
            *text = new_text.clone();
        }
        ContentChange::Incremental { span, text: new_text } => {
            let start = offset_at(text, span.start_line, span.start_col);
            if start >= text.len() {
                // 末尾以降を指す範囲は追記として扱う
                text.push_str(new_text);
                return;
            }
            let end = offset_at(text, span.end_line, span.end_col).clamp(start, text.len());
            text.replace_range(start..end, new_text);
        }
    }
}

/// 行・UTF-16列をバイトオフセットに変換する。行が範囲外なら末尾を返す
pub fn offset_at(text: &str, line: u32, utf16_col: u32) -> usize {
    let mut offset = 0;
    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        if index == line as usize {
            let content = raw_line.strip_suffix('\n').unwrap_or(raw_line);
            let content = content.strip_suffix('\r').unwrap_or(content);
            return offset + utf16_col_to_byte(content, utf16_col);
        }
        offset += raw_line.len();
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incremental(span: (u32, u32, u32, u32), text: &str) -> ContentChange {
        ContentChange::Incremental {
            span: Span::new(span.0, span.1, span.2, span.3),
            text: text.to_string(),
        }
    }

    fn store_with(path: &str, text: &str) -> DocumentStore {
        let store = DocumentStore::new();
        store.insert(PathBuf::from(path), text.to_string());
        store
    }

    #[test]
    fn test_insert_get_has() {
        let store = store_with("/a/A.tsx", "hello");
        assert!(store.has(Path::new("/a/A.tsx")));
        assert_eq!(store.get(Path::new("/a/A.tsx")).as_deref(), Some("hello"));
        assert!(!store.has(Path::new("/a/B.tsx")));
        assert_eq!(store.get(Path::new("/a/B.tsx")), None);

        store.insert(PathBuf::from("/a/A.tsx"), "bye".to_string());
        assert_eq!(store.get(Path::new("/a/A.tsx")).as_deref(), Some("bye"));
    }

    #[test]
    fn test_offset_at() {
        let text = "ab\r\ncd\nef";
        assert_eq!(offset_at(text, 0, 0), 0);
        assert_eq!(offset_at(text, 0, 2), 2);
        // 行末を超える列は行末に丸める
        assert_eq!(offset_at(text, 0, 10), 2);
        assert_eq!(offset_at(text, 1, 1), 5);
        assert_eq!(offset_at(text, 2, 2), 9);
        assert_eq!(offset_at(text, 5, 0), text.len());
    }

    #[test]
    fn test_incremental_replace() {
        let store = store_with("/a/A.tsx", "<div className=\"a\" />\n");
        let path = Path::new("/a/A.tsx");
        assert!(store.apply_change(path, &[incremental((0, 16, 0, 17), "b")]));
        assert_eq!(store.get(path).unwrap(), "<div className=\"b\" />\n");
    }

    #[test]
    fn test_multiple_deltas_applied_in_order() {
        let path = Path::new("/a/A.tsx");
        let store = store_with("/a/A.tsx", "line one\nline two\n");
        // 2つ目の変更は1つ目の適用結果に対する位置
        store.apply_change(
            path,
            &[
                incremental((0, 5, 0, 8), "1"),
                incremental((1, 0, 1, 0), "the "),
                incremental((0, 6, 0, 6), "!"),
            ],
        );
        assert_eq!(store.get(path).unwrap(), "line 1!\nthe line two\n");
    }

    #[test]
    fn test_incremental_sequence_equals_full_replace() {
        let original = "const a = 1;\nconst b = 2;\nexport {};\n";
        let path = Path::new("/a/A.tsx");

        let incremental_store = store_with("/a/A.tsx", original);
        incremental_store.apply_change(
            path,
            &[
                incremental((1, 6, 1, 7), "size"),
                incremental((0, 10, 0, 11), "\"lg\""),
                incremental((2, 0, 2, 10), ""),
                incremental((0, 0, 0, 0), "// header\n"),
            ],
        );

        let full_store = store_with("/a/A.tsx", original);
        full_store.apply_change(
            path,
            &[ContentChange::Full(
                "// header\nconst a = \"lg\";\nconst size = 2;\n\n".to_string(),
            )],
        );

        assert_eq!(incremental_store.get(path), full_store.get(path));
    }

    #[test]
    fn test_start_beyond_end_appends() {
        let path = Path::new("/a/A.tsx");
        let store = store_with("/a/A.tsx", "abc");
        store.apply_change(path, &[incremental((3, 0, 3, 0), "def")]);
        assert_eq!(store.get(path).unwrap(), "abcdef");

        store.apply_change(path, &[incremental((0, 6, 0, 9), "!")]);
        assert_eq!(store.get(path).unwrap(), "abcdef!");
    }

    #[test]
    fn test_multiline_range_replace() {
        let path = Path::new("/a/A.tsx");
        let store = store_with("/a/A.tsx", "a\nb\nc\n");
        store.apply_change(path, &[incremental((0, 1, 2, 0), "-")]);
        assert_eq!(store.get(path).unwrap(), "a-c\n");
    }

    #[test]
    fn test_utf16_columns() {
        let path = Path::new("/a/A.tsx");
        let store = store_with("/a/A.tsx", "日本x");
        store.apply_change(path, &[incremental((0, 2, 0, 3), "y")]);
        assert_eq!(store.get(path).unwrap(), "日本y");
    }

    #[test]
    fn test_unknown_document_is_noop() {
        let store = DocumentStore::new();
        let path = Path::new("/a/missing.tsx");
        assert!(!store.apply_change(path, &[ContentChange::Full("x".to_string())]));
        assert!(!store.has(path));
    }
}
