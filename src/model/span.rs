use tower_lsp::lsp_types::{Position, Range};

/// 位置情報の統一型（0始まりの行、UTF-16単位の列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// 指定位置がスパン内に含まれるかチェック
    pub fn contains(&self, line: u32, col: u32) -> bool {
        if line < self.start_line || line > self.end_line {
            return false;
        }
        if line == self.start_line && col < self.start_col {
            return false;
        }
        if line == self.end_line && col > self.end_col {
            return false;
        }
        true
    }

    /// LSP Range に変換
    pub fn to_lsp_range(&self) -> Range {
        Range {
            start: Position {
                line: self.start_line,
                character: self.start_col,
            },
            end: Position {
                line: self.end_line,
                character: self.end_col,
            },
        }
    }

    /// LSP Range から変換
    pub fn from_lsp_range(range: &Range) -> Self {
        Self::new(
            range.start.line,
            range.start.character,
            range.end.line,
            range.end.character,
        )
    }
}
