//! ファイル読み込み（バイト列・プレビュー）

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

/// ファイル内容をバイト列として読み込む
pub async fn read_bytes(file: &File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// プレビュー用Data URLを非同期に読み込む
///
/// 読み込み完了時に `on_loaded` を1回だけ呼ぶ。結果を使うかどうかは
/// 呼び出し側が世代番号で判断する。
pub fn read_preview<F>(file: &File, on_loaded: F) -> Result<(), JsValue>
where
    F: FnOnce(String) + 'static,
{
    let reader = FileReader::new()?;

    let reader_clone = reader.clone();
    let mut on_loaded = Some(on_loaded);
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        if let (Some(data_url), Some(callback)) = (data_url, on_loaded.take()) {
            callback(data_url);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    reader.read_as_data_url(file)
}
