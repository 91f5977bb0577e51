//! 解析API呼び出し（fetch + FormData）

use js_sys::{Array, Uint8Array};
use skin_eval_common::{
    analyze_url, interpret_response, AnalysisResult, Error, Result, SelectedImage, IMAGE_PART,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, Response};

fn transport(e: JsValue) -> Error {
    Error::Transport(format!("{:?}", e))
}

/// 画像をBlobにしてパート `image` に詰める
fn build_form(image: &SelectedImage) -> std::result::Result<FormData, JsValue> {
    let bytes = Uint8Array::from(image.bytes.as_slice());
    let parts = Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(image.effective_media_type());
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(IMAGE_PART, &blob, &image.file_name)?;
    Ok(form)
}

/// `POST {base_url}/analyze` に画像を送信
///
/// 1回の呼び出しでリクエストは1回だけ。再試行はしない。
pub async fn post_image(base_url: &str, image: &SelectedImage) -> Result<AnalysisResult> {
    let form = build_form(image).map_err(transport)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&analyze_url(base_url), &opts).map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| Error::Transport("window がありません".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;

    let body = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    interpret_response(resp.status(), &body)
}
