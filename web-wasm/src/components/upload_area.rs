//! アップロードエリアコンポーネント
//!
//! カメラ撮影用とギャラリー選択用の2つの隠しinputを持つ。
//! プレビューがある間は画像と「Change Image」ボタンを表示する。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};
use skin_eval_common::WorkflowView;

/// inputから先頭のファイルを取り出し、同じファイルを再選択できるよう値をクリア
fn take_selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    let file = input.files().and_then(|files| files.get(0));
    input.set_value("");
    file
}

#[component]
pub fn UploadArea<F, R>(
    view_state: Memo<WorkflowView>,
    on_file_selected: F,
    on_reset: R,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send + Sync,
    R: Fn(()) + 'static + Clone + Send + Sync,
{
    let preview = move || view_state.with(|v| v.preview.clone());

    let on_change = move |ev: Event| {
        if let Some(file) = take_selected_file(&ev) {
            on_file_selected(file);
        }
    };

    view! {
        <div class="image-section">
            <Show
                when=move || preview().is_some()
                fallback={
                    let on_change = on_change.clone();
                    move || {
                        let on_camera = on_change.clone();
                        let on_gallery = on_change.clone();
                        view! {
                            <div class="upload-section">
                                <div class="upload-buttons">
                                    <label for="camera-input" class="btn btn-primary">
                                        "📷 Take Photo"
                                    </label>
                                    <input
                                        id="camera-input"
                                        type="file"
                                        accept="image/*"
                                        capture="environment"
                                        style="display: none"
                                        on:change=on_camera
                                    />

                                    <label for="gallery-input" class="btn btn-primary">
                                        "🖼️ Upload Photo"
                                    </label>
                                    <input
                                        id="gallery-input"
                                        type="file"
                                        accept="image/*"
                                        style="display: none"
                                        on:change=on_gallery
                                    />
                                </div>
                            </div>
                        }
                    }
                }
            >
                <div class="preview-container">
                    <img
                        src=move || preview().map(|p| p.into_inner()).unwrap_or_default()
                        alt="Preview"
                        class="preview-image"
                    />
                    <button
                        class="btn btn-secondary"
                        on:click={
                            let on_reset = on_reset.clone();
                            move |_| on_reset(())
                        }
                    >
                        "Change Image"
                    </button>
                </div>
            </Show>
        </div>
    }
}
