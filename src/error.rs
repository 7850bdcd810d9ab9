use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// アナライザー解析エラー
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("Failed to load grammar: {0}")]
    Language(String),
}

/// ディレクトリインデックス操作エラー
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),
}
