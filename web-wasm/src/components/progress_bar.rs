//! 解析中スピナー

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading-container">
            <div class="spinner"></div>
            <p>"Analyzing image with AI..."</p>
        </div>
    }
}
