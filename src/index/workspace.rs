use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PathMatcher;
use crate::error::IndexError;

/// ディレクトリ直下のマークアップファイルを列挙する（サブディレクトリは辿らない）
pub fn collect_sibling_files(dir: &Path, matcher: &PathMatcher) -> Result<Vec<PathBuf>, IndexError> {
    let entries = fs::read_dir(dir).map_err(|source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && matcher.should_include(path))
        .collect();
    files.sort();
    Ok(files)
}

/// ファイル内容を読み込む
pub fn read_file(path: &Path) -> Result<String, IndexError> {
    fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })
}
