use std::path::Path;

/// 拡張子（小文字）を取得
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 拡張子がリストに含まれるか判定
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    extension_of(path)
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// テキストを行に分割（行末の`\r`は除去）
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// UTF-16の列位置を行内のバイトオフセットに変換
/// 行末を超える場合は行の長さに丸める
pub fn utf16_col_to_byte(line: &str, utf16_col: u32) -> usize {
    let mut utf16_count = 0usize;
    for (byte_idx, ch) in line.char_indices() {
        if utf16_count >= utf16_col as usize {
            return byte_idx;
        }
        utf16_count += ch.len_utf16();
    }
    line.len()
}

/// 行内のバイトオフセットをUTF-16の列位置に変換
pub fn byte_col_to_utf16(line: &str, byte_col: usize) -> u32 {
    let mut end = byte_col.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].encode_utf16().count() as u32
}
