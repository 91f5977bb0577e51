//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"SkinEval"</h1>
            <p class="subtitle">"AI-Powered Skin Analysis"</p>
        </header>
    }
}
