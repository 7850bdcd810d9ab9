use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// 兄弟ファイルのマッチング用の構造体
///
/// ファイル名（ディレクトリ部分を除く）に対して判定する。
#[derive(Debug, Clone)]
pub struct PathMatcher {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathMatcher {
    /// 拡張子リストとexcludeパターンからPathMatcherを作成
    pub fn new(extensions: &[String], exclude: &[String]) -> Result<Self, String> {
        let mut include_builder = GlobSetBuilder::new();
        for ext in extensions {
            let pattern = format!("*.{}", ext);
            let glob = GlobBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| format!("Invalid extension '{}': {}", ext, e))?;
            include_builder.add(glob);
        }
        let include_set = include_builder
            .build()
            .map_err(|e| format!("Failed to build include set: {}", e))?;

        let mut exclude_builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern)
                .map_err(|e| format!("Invalid exclude pattern '{}': {}", pattern, e))?;
            exclude_builder.add(glob);
        }
        let exclude_set = exclude_builder
            .build()
            .map_err(|e| format!("Failed to build exclude set: {}", e))?;

        Ok(Self {
            include: include_set,
            exclude: exclude_set,
        })
    }

    /// 何にもマッチしないPathMatcher
    pub fn empty() -> Self {
        Self {
            include: GlobSet::empty(),
            exclude: GlobSet::empty(),
        }
    }

    /// ファイルがインデックス対象かどうかを判定
    pub fn should_include(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name() else {
            return false;
        };
        let file_name = Path::new(file_name);
        if self.exclude.is_match(file_name) {
            return false;
        }
        self.include.is_match(file_name)
    }
}
