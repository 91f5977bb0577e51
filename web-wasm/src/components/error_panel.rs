//! エラー表示
//!
//! `Failed` 状態のメッセージと、状態を変えない通知（画像未選択など）を表示する。

use leptos::prelude::*;
use skin_eval_common::WorkflowView;

#[component]
pub fn ErrorPanel<R>(
    view_state: Memo<WorkflowView>,
    notice: RwSignal<Option<String>>,
    on_reset: R,
) -> impl IntoView
where
    R: Fn(()) + 'static + Clone + Send + Sync,
{
    let message = move || view_state.with(|v| v.error.clone()).or_else(|| notice.get());

    view! {
        <Show when=move || message().is_some()>
            <div class="error-container">
                <p class="error-message">{move || format!("⚠️ {}", message().unwrap_or_default())}</p>
                <button
                    class="btn btn-secondary"
                    on:click={
                        let on_reset = on_reset.clone();
                        move |_| on_reset(())
                    }
                >
                    "Try Again"
                </button>
            </div>
        </Show>
    }
}
