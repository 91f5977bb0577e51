//! SkinEval Web App (Leptos + WASM)

mod app;
mod api;
mod components;
mod config;
mod files;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
