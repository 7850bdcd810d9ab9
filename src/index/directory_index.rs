use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::analyzer::{MarkupIndexer, StyleIndexer};
use crate::config::{ClassRefConfig, PathMatcher};
use crate::error::IndexError;
use crate::model::{ClassOccurrence, SelectorSet};
use crate::util::has_extension;

use super::document_store::DocumentStore;
use super::workspace::{collect_sibling_files, read_file};

/// ディレクトリ単位のインデックス
#[derive(Clone, Debug, Default)]
pub struct DirectoryEntry {
    pub dir: PathBuf,
    /// マークアップファイル -> クラス名出現リスト
    markup: BTreeMap<PathBuf, Vec<ClassOccurrence>>,
    /// スタイルシート -> 定義済みクラス名
    stylesheets: BTreeMap<PathBuf, SelectorSet>,
}

impl DirectoryEntry {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            ..Default::default()
        }
    }

    /// 全マークアップファイルの出現をファイルパス順・文書順で返す
    pub fn occurrences(&self) -> impl Iterator<Item = &ClassOccurrence> {
        self.markup.values().flatten()
    }

    pub fn selector_set(&self, stylesheet: &Path) -> Option<&SelectorSet> {
        self.stylesheets.get(stylesheet)
    }

    pub fn markup_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.markup.keys()
    }
}

/// 設定から組み立てる解析用の部品
#[derive(Clone, Debug)]
struct IndexSettings {
    config: ClassRefConfig,
    matcher: PathMatcher,
    markup: MarkupIndexer,
    style: StyleIndexer,
}

impl IndexSettings {
    fn from_config(config: ClassRefConfig) -> Self {
        let matcher = config
            .create_path_matcher()
            .or_else(|e| {
                warn!("Invalid file patterns, falling back to defaults: {}", e);
                ClassRefConfig::default().create_path_matcher()
            })
            .unwrap_or_else(|_| PathMatcher::empty());
        let markup = MarkupIndexer::new(&config.class_attribute);
        Self {
            config,
            matcher,
            markup,
            style: StyleIndexer::new(),
        }
    }
}

/// ディレクトリごとにマークアップとスタイルシートの解析結果を束ねるインデックス
pub struct DirectoryIndex {
    documents: Arc<DocumentStore>,
    entries: DashMap<PathBuf, DirectoryEntry>,
    settings: RwLock<IndexSettings>,
}

impl DirectoryIndex {
    pub fn new(documents: Arc<DocumentStore>, config: ClassRefConfig) -> Self {
        Self {
            documents,
            entries: DashMap::new(),
            settings: RwLock::new(IndexSettings::from_config(config)),
        }
    }

    /// 設定を丸ごと差し替える
    pub fn set_config(&self, config: ClassRefConfig) {
        if let Ok(mut settings) = self.settings.write() {
            *settings = IndexSettings::from_config(config);
        }
    }

    fn settings(&self) -> Option<IndexSettings> {
        self.settings.read().ok().map(|s| s.clone())
    }

    pub fn is_markup_file(&self, path: &Path) -> bool {
        self.settings()
            .map(|s| s.matcher.should_include(path))
            .unwrap_or(false)
    }

    pub fn is_stylesheet_file(&self, path: &Path) -> bool {
        self.settings()
            .map(|s| has_extension(path, &s.config.stylesheet_extensions))
            .unwrap_or(false)
    }

    /// ディレクトリのスナップショットを取得
    pub fn get_entry(&self, dir: &Path) -> Option<DirectoryEntry> {
        self.entries.get(dir).map(|entry| entry.value().clone())
    }

    /// スタイルシートを起点にディレクトリを初期化する
    ///
    /// 既に初期化済みのディレクトリでは何もせず `Ok(false)` を返す。
    /// 兄弟ファイルの列挙はこの時点の一度だけで、後から追加されたファイルは拾わない。
    pub fn initialize(&self, stylesheet: &Path) -> Result<bool, IndexError> {
        let Some(dir) = stylesheet.parent() else {
            return Ok(false);
        };
        if self.entries.contains_key(dir) {
            return Ok(false);
        }
        let Some(settings) = self.settings() else {
            return Ok(false);
        };

        let mut entry = DirectoryEntry::new(dir.to_path_buf());

        for file in collect_sibling_files(dir, &settings.matcher)? {
            let Some(text) = self.current_or_disk_text(&file) else {
                continue;
            };
            match settings.markup.index(&file, &text) {
                Ok(occurrences) => {
                    entry.markup.insert(file, occurrences);
                }
                Err(e) => warn!("Failed to index markup {}: {}", file.display(), e),
            }
        }

        if let Some(text) = self.current_or_disk_text(stylesheet) {
            match settings.style.index(stylesheet, &text) {
                Ok(selectors) => {
                    entry.stylesheets.insert(stylesheet.to_path_buf(), selectors);
                }
                Err(e) => warn!("Failed to index stylesheet {}: {}", stylesheet.display(), e),
            }
        }

        info!(
            "Initialized {}: {} markup files, {} stylesheets",
            dir.display(),
            entry.markup.len(),
            entry.stylesheets.len()
        );
        // 同時に初期化された場合は先に登録された方を残す
        self.entries.entry(dir.to_path_buf()).or_insert(entry);
        Ok(true)
    }

    /// マークアップファイルを現在のテキストで再解析する
    ///
    /// ディレクトリが未初期化の場合は何もしない。解析に失敗した場合は前回の結果を残す。
    pub fn update_markup_file(&self, path: &Path) -> bool {
        let Some(dir) = path.parent() else {
            return false;
        };
        if !self.entries.contains_key(dir) {
            debug!("update_markup_file: {} is not initialized", dir.display());
            return false;
        }
        let (Some(text), Some(settings)) = (self.documents.get(path), self.settings()) else {
            return false;
        };

        match settings.markup.index(path, &text) {
            Ok(occurrences) => {
                debug!(
                    "Reindexed {}: {} class occurrences",
                    path.display(),
                    occurrences.len()
                );
                if let Some(mut entry) = self.entries.get_mut(dir) {
                    entry.markup.insert(path.to_path_buf(), occurrences);
                }
                true
            }
            Err(e) => {
                warn!("Failed to index markup {}: {}", path.display(), e);
                false
            }
        }
    }

    /// スタイルシートを現在のテキストで再解析する
    pub fn update_style_file(&self, path: &Path) -> bool {
        let Some(dir) = path.parent() else {
            return false;
        };
        if !self.entries.contains_key(dir) {
            debug!("update_style_file: {} is not initialized", dir.display());
            return false;
        }
        let (Some(text), Some(settings)) = (self.documents.get(path), self.settings()) else {
            return false;
        };

        match settings.style.index(path, &text) {
            Ok(selectors) => {
                debug!(
                    "Reindexed {}: {} class selectors",
                    path.display(),
                    selectors.len()
                );
                if let Some(mut entry) = self.entries.get_mut(dir) {
                    entry.stylesheets.insert(path.to_path_buf(), selectors);
                }
                true
            }
            Err(e) => {
                warn!("Failed to index stylesheet {}: {}", path.display(), e);
                false
            }
        }
    }

    /// 開いているバッファがあればそれを、無ければディスクの内容を使う
    fn current_or_disk_text(&self, path: &Path) -> Option<String> {
        if let Some(text) = self.documents.get(path) {
            return Some(text);
        }
        match read_file(path) {
            Ok(text) => {
                self.documents.insert(path.to_path_buf(), text.clone());
                Some(text)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}
