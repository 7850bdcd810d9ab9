use std::path::PathBuf;

use super::span::Span;

/// マークアップ内で捕捉したクラス名の出現情報
///
/// ファイル単位で丸ごと再計算されるため、一度生成されたら変更しない。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassOccurrence {
    /// 解決後のクラス名
    pub class_name: String,
    /// 解決前の属性値テキスト
    pub origin_text: String,
    /// 出現したファイル
    pub file: PathBuf,
    /// 属性値ノードの範囲（属性全体ではない）
    pub span: Span,
}

impl ClassOccurrence {
    /// 補完ラベル（`.className`）
    pub fn label(&self) -> String {
        format!(".{}", self.class_name)
    }
}
