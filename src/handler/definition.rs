use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::index::Index;
use crate::util::{split_lines, utf16_col_to_byte};

static CLASS_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.([\w-]+)").unwrap());

pub struct DefinitionHandler {
    index: Arc<Index>,
}

impl DefinitionHandler {
    pub fn new(index: Arc<Index>) -> Self {
        Self { index }
    }

    pub fn goto_definition(&self, params: GotoDefinitionParams) -> Option<GotoDefinitionResponse> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;
        let path = uri.to_file_path().ok()?;

        let locations = self.find_definitions(&path, position.line, position.character);
        if locations.is_empty() {
            return None;
        }
        Some(GotoDefinitionResponse::Array(locations))
    }

    /// カーソル位置の `.className` を使っているマークアップの位置を全て返す
    pub fn find_definitions(&self, path: &Path, line: u32, character: u32) -> Vec<Location> {
        let Some(text) = self.index.documents.get(path) else {
            return Vec::new();
        };
        let Some(class_name) = class_token_at(&text, line, character) else {
            debug!("No class token at {}:{}:{}", path.display(), line, character);
            return Vec::new();
        };
        let Some(entry) = self.index.entry_for(path) else {
            return Vec::new();
        };

        entry
            .occurrences()
            .filter(|occurrence| occurrence.class_name == class_name)
            .filter_map(|occurrence| {
                let uri = Url::from_file_path(&occurrence.file).ok()?;
                Some(Location {
                    uri,
                    range: occurrence.span.to_lsp_range(),
                })
            })
            .collect()
    }
}

/// 行内のカーソル位置を含む `.className` トークンからクラス名を取り出す
///
/// トークンの終端もカーソル位置として含める。
pub fn class_token_at(text: &str, line: u32, character: u32) -> Option<String> {
    let line_text = split_lines(text).nth(line as usize)?;
    let byte_col = utf16_col_to_byte(line_text, character);

    CLASS_TOKEN_RE
        .captures_iter(line_text)
        .find_map(|caps| {
            let whole = caps.get(0)?;
            if whole.start() <= byte_col && byte_col <= whole.end() {
                caps.get(1).map(|name| name.as_str().to_string())
            } else {
                None
            }
        })
}
