//! 固定文言のセクション（注意書き・撮影ガイド・プライバシー）

use leptos::prelude::*;
use skin_eval_common::content::{MEDICAL_NOTICE, PHOTO_GUIDELINES, PRIVACY_POINTS};

#[component]
pub fn MedicalNotice() -> impl IntoView {
    view! {
        <div class="medical-notice">
            <h3>"⚠️ Important Medical Notice"</h3>
            <p>{MEDICAL_NOTICE}</p>
        </div>
    }
}

#[component]
pub fn Guidelines() -> impl IntoView {
    view! {
        <div class="guidelines-section">
            <h3>"📸 Photo Guidelines"</h3>
            <ul class="guidelines-list">
                {PHOTO_GUIDELINES.iter().map(|line| view! { <li>{*line}</li> }).collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn PrivacyNotice() -> impl IntoView {
    view! {
        <div class="privacy-section">
            <h3>"🔒 Privacy & Data Protection"</h3>
            <p class="privacy-intro">
                "Your privacy is our priority. " <strong>"No login required."</strong>
            </p>
            <p class="privacy-subtitle">"How we protect your privacy:"</p>
            <ul class="privacy-list">
                {PRIVACY_POINTS.iter().map(|line| view! { <li>{*line}</li> }).collect_view()}
            </ul>
        </div>
    }
}
