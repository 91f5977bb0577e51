//! 解析ボタン

use leptos::prelude::*;
use skin_eval_common::WorkflowView;

#[component]
pub fn AnalyzeButton<FA>(view_state: Memo<WorkflowView>, on_analyze: FA) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
{
    let is_loading = move || view_state.with(|v| v.is_loading);

    view! {
        <div class="analyze-section">
            <button
                class="btn btn-analyze"
                disabled=move || !view_state.with(|v| v.can_submit)
                on:click={
                    let on_analyze = on_analyze.clone();
                    move |_| on_analyze(())
                }
            >
                {move || if is_loading() { "Analyzing..." } else { "🔍 Analyze Skin Condition" }}
            </button>
        </div>
    }
}
