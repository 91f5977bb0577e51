pub mod analyze_button;
pub mod error_panel;
pub mod header;
pub mod info_sections;
pub mod progress_bar;
pub mod results_panel;
pub mod upload_area;
