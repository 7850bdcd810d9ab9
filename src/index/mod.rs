mod directory_index;
mod document_store;
pub mod workspace;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClassRefConfig;

pub use directory_index::{DirectoryEntry, DirectoryIndex};
pub use document_store::{offset_at, ContentChange, DocumentStore};

/// セッション単位のインデックス
///
/// ドキュメントストアとディレクトリインデックスを束ね、各ハンドラーに参照で渡す。
pub struct Index {
    pub documents: Arc<DocumentStore>,
    pub directories: DirectoryIndex,
}

impl Index {
    pub fn new() -> Self {
        Self::with_config(ClassRefConfig::default())
    }

    pub fn with_config(config: ClassRefConfig) -> Self {
        let documents = Arc::new(DocumentStore::new());
        let directories = DirectoryIndex::new(Arc::clone(&documents), config);
        Self {
            documents,
            directories,
        }
    }

    pub fn set_config(&self, config: ClassRefConfig) {
        self.directories.set_config(config);
    }

    pub fn is_markup_file(&self, path: &Path) -> bool {
        self.directories.is_markup_file(path)
    }

    pub fn is_stylesheet_file(&self, path: &Path) -> bool {
        self.directories.is_stylesheet_file(path)
    }

    /// ファイルを開いた時の処理
    pub fn open_document(&self, path: PathBuf, text: String) {
        self.documents.insert(path.clone(), text);

        if self.is_stylesheet_file(&path) {
            match self.directories.initialize(&path) {
                Ok(true) => {}
                // 既存ディレクトリの別スタイルシートも個別に登録する
                Ok(false) => {
                    self.directories.update_style_file(&path);
                }
                Err(e) => warn!("Failed to initialize directory for {}: {}", path.display(), e),
            }
        } else if self.is_markup_file(&path) {
            self.directories.update_markup_file(&path);
        } else {
            debug!("open_document: ignoring {}", path.display());
        }
    }

    /// 変更を受信順に適用し、ファイルを再インデックスする
    ///
    /// 未登録のドキュメントへの変更は無視して `false` を返す。
    pub fn change_document(&self, path: &Path, changes: &[ContentChange]) -> bool {
        if !self.documents.apply_change(path, changes) {
            return false;
        }
        self.reindex(path);
        true
    }

    /// 保存時のテキストでバッファを置き換えて再インデックスする
    pub fn save_document(&self, path: PathBuf, text: String) {
        self.documents.insert(path.clone(), text);
        self.reindex(&path);
    }

    fn reindex(&self, path: &Path) {
        if self.is_stylesheet_file(path) {
            self.directories.update_style_file(path);
        } else if self.is_markup_file(path) {
            self.directories.update_markup_file(path);
        }
    }

    /// 指定ファイルが属するディレクトリのスナップショット
    pub fn entry_for(&self, path: &Path) -> Option<DirectoryEntry> {
        self.directories.get_entry(path.parent()?)
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
