//! メインアプリケーションコンポーネント
//!
//! 状態はすべて `WorkflowMachine` 1つに集約し、各コンポーネントは
//! そこから作った `WorkflowView` を表示するだけにする。

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;
use crate::api::analyze::post_image;
use crate::components::{
    analyze_button::AnalyzeButton,
    error_panel::ErrorPanel,
    header::Header,
    info_sections::{Guidelines, MedicalNotice, PrivacyNotice},
    progress_bar::LoadingSpinner,
    results_panel::ResultsPanel,
    upload_area::UploadArea,
};
use crate::config::api_base_url;
use crate::files::{read_bytes, read_preview};
use skin_eval_common::{PreviewHandle, SelectedImage, WorkflowMachine, WorkflowMode, WorkflowView};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let machine = RwSignal::new(WorkflowMachine::new());
    let view_state = Memo::new(move |_| machine.with(|m| m.view()));
    // 前提条件エラーなど、状態を変えない通知
    let notice = RwSignal::new(None::<String>);
    // ファイル読み込み中に次のファイルが選ばれた場合に古い読み込みを捨てる
    let latest_pick = StoredValue::new(0u64);

    let on_file_selected = move |file: File| {
        latest_pick.update_value(|n| *n += 1);
        let pick = latest_pick.get_value();
        notice.set(None);

        spawn_local(async move {
            let bytes = match read_bytes(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    gloo::console::error!("ファイル読み込み失敗", e);
                    return;
                }
            };
            if pick != latest_pick.get_value() {
                return;
            }

            let image = SelectedImage::new(file.name(), file.type_(), bytes);
            let Some(ticket) = machine.try_update(|m| m.select_image(image)) else {
                return;
            };

            let generation = ticket.generation;
            let result = read_preview(&file, move |data_url| {
                machine.update(|m| {
                    m.apply_preview(generation, PreviewHandle::new(data_url));
                });
            });
            if let Err(e) = result {
                gloo::console::error!("プレビュー生成失敗", e);
            }
        });
    };

    let on_analyze = move |_: ()| {
        let ticket = match machine.try_update(|m| m.begin_submit()) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                notice.set(Some(e.to_string()));
                return;
            }
            None => return,
        };
        notice.set(None);

        spawn_local(async move {
            let response = post_image(api_base_url(), &ticket.image).await;
            if let Err(e) = &response {
                gloo::console::error!("Analysis error:", e.to_string());
            }
            machine.update(|m| {
                m.complete_submit(ticket.generation, response);
            });
        });
    };

    let on_reset = move |_: ()| {
        notice.set(None);
        machine.update(|m| m.reset());
    };

    let mode = move || view_state.with(|v: &WorkflowView| v.mode);

    view! {
        <div class="App">
            <div class="container">
                <Header />

                <main class="main-content">
                    <MedicalNotice />

                    <Show
                        when=move || mode() != WorkflowMode::ResultsReady
                        fallback=move || view! {
                            <ResultsPanel view_state=view_state on_reset=on_reset />
                        }
                    >
                        <div class="get-started-section">
                            <h2>"Get Started with Skin Analysis"</h2>
                            <p class="get-started-text">
                                "Capture or upload a clear photo of the skin area you'd like to analyze. "
                                "Our AI will provide preliminary insights about potential conditions."
                            </p>
                            <UploadArea
                                view_state=view_state
                                on_file_selected=on_file_selected
                                on_reset=on_reset
                            />
                        </div>

                        <Guidelines />
                        <PrivacyNotice />

                        <Show when=move || view_state.with(|v| v.file_name.is_some())>
                            <AnalyzeButton view_state=view_state on_analyze=on_analyze />
                        </Show>

                        <Show when=move || view_state.with(|v| v.is_loading)>
                            <LoadingSpinner />
                        </Show>

                        <ErrorPanel view_state=view_state notice=notice on_reset=on_reset />
                    </Show>
                </main>
            </div>
        </div>
    }
}
