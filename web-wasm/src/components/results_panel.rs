//! 解析結果表示

use leptos::prelude::*;
use skin_eval_common::content::MEDICAL_DISCLAIMER;
use skin_eval_common::{AnalysisResult, WorkflowView};

fn confidence_badge(confidence: u8) -> String {
    format!("{}% confidence", confidence)
}

#[component]
pub fn ResultsPanel<R>(view_state: Memo<WorkflowView>, on_reset: R) -> impl IntoView
where
    R: Fn(()) + 'static + Clone + Send + Sync,
{
    let result = move || view_state.with(|v| v.result.clone());

    view! {
        <div class="results-section">
            <h2>"Analysis Results"</h2>

            {move || result().map(|r: AnalysisResult| {
                // 代替候補はサーバーの順序のまま表示
                let alternatives = r.has_alternatives().then(|| view! {
                    <div class="alternatives-section">
                        <h3>"Alternative Possible Conditions"</h3>
                        <div class="alternatives-list">
                            {r.alternatives.iter().map(|alt| view! {
                                <div class="result-card alternative">
                                    <div class="alternative-header">
                                        <span class="alternative-name">{alt.name.clone()}</span>
                                        <span class="alternative-confidence">
                                            {format!("{}%", alt.confidence)}
                                        </span>
                                    </div>
                                </div>
                            }).collect_view()}
                        </div>
                    </div>
                });

                view! {
                    <div class="result-card primary">
                        <div class="result-header">
                            <h3>{r.condition.clone()}</h3>
                            <span class="confidence-badge">{confidence_badge(r.confidence)}</span>
                        </div>
                        <p class="description">{r.description.clone()}</p>
                    </div>
                    {alternatives}
                }
            })}

            <div class="disclaimer">
                <p>"⚠️ " <strong>"Medical Disclaimer:"</strong> " " {MEDICAL_DISCLAIMER}</p>
            </div>

            <button
                class="btn btn-primary"
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                "Analyze Another Image"
            </button>
        </div>
    }
}
