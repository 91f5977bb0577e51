//! ワークフロー状態のテキスト表示
//!
//! 表示は `WorkflowView` だけから決まる純粋関数。

use skin_eval_common::content::MEDICAL_DISCLAIMER;
use skin_eval_common::{AnalysisResult, WorkflowMode, WorkflowView};

pub fn render(view: &WorkflowView) -> String {
    match view.mode {
        WorkflowMode::Idle => "画像を選択してください（Upload Photo）".to_string(),
        WorkflowMode::ImageSelected => {
            let name = view.file_name.as_deref().unwrap_or("(unnamed)");
            let preview = if view.preview.is_some() { "プレビュー準備完了" } else { "プレビュー生成中" };
            format!("📷 {} ({})", name, preview)
        }
        WorkflowMode::Submitting => "Analyzing image with AI...".to_string(),
        WorkflowMode::Failed => {
            let message = view.error.as_deref().unwrap_or_default();
            format!("⚠️ {}\n再試行するか、別の画像を選択してください", message)
        }
        WorkflowMode::ResultsReady => match &view.result {
            Some(result) => render_result(result),
            None => String::new(),
        },
    }
}

pub fn render_result(result: &AnalysisResult) -> String {
    let mut out = String::from("Analysis Results\n================\n");
    out.push_str(&format!("{} ({}% confidence)\n", result.condition, result.confidence));
    out.push_str(&result.description);
    out.push('\n');

    // 代替候補はサーバーの順序のまま
    if result.has_alternatives() {
        out.push_str("\nAlternative Possible Conditions\n");
        for alt in &result.alternatives {
            out.push_str(&format!("  - {} ({}%)\n", alt.name, alt.confidence));
        }
    }

    out.push_str(&format!("\n⚠️ Medical Disclaimer: {}", MEDICAL_DISCLAIMER));
    out
}
