use crate::error::{Result, SkinEvalError};
use skin_eval_common::{guess_media_type, SelectedImage};
use std::path::Path;

/// 画像ファイルを読み込んで `SelectedImage` を作る
///
/// 内容が画像かどうかはここでは判定しない（解析サービス側で検証）。
pub fn load_image(path: &Path) -> Result<SelectedImage> {
    if !path.exists() {
        return Err(SkinEvalError::FileNotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(SkinEvalError::ImageLoad(format!(
            "ファイルではありません: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let media_type = guess_media_type(&file_name);

    Ok(SelectedImage::new(file_name, media_type, bytes))
}
