//! プレビュー生成とMIMEタイプ推定

use base64::{engine::general_purpose::STANDARD, Engine};
use crate::types::{PreviewHandle, SelectedImage};

/// 拡張子 → MIMEタイプ
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("bmp", "image/bmp"),
];

/// 選択画像からプレビュー用Data URLを生成
pub fn derive_preview(image: &SelectedImage) -> PreviewHandle {
    let encoded = STANDARD.encode(&image.bytes);
    PreviewHandle::new(format!(
        "data:{};base64,{}",
        image.effective_media_type(),
        encoded
    ))
}

/// ファイル名の拡張子からMIMEタイプを推定
///
/// ブラウザのように申告されたタイプがないCLI用。未知の拡張子は
/// application/octet-stream（内容の検証はサーバー側に任せる）。
pub fn guess_media_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or("application/octet-stream")
}
