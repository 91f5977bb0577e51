//! 対話モード
//!
//! 画像選択 → 解析 → 結果表示 → 次の画像 のサイクルを端末上で繰り返す。

use crate::analyzer::Analyzer;
use crate::error::{Result, SkinEvalError};
use crate::render::render;
use crate::scanner::load_image;
use crate::workflow::Workflow;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use skin_eval_common::content::{MEDICAL_NOTICE, PHOTO_GUIDELINES};
use skin_eval_common::WorkflowMode;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// 保持中の画像を解析
    Analyze,
    /// 画像を選び直す
    ChangeImage,
    /// 同じ画像で再送信
    TryAgain,
    /// 結果を破棄して次の画像へ
    AnalyzeAnother,
    Quit,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Analyze => "🔍 Analyze Skin Condition",
            MenuAction::ChangeImage => "Change Image",
            MenuAction::TryAgain => "Try Again",
            MenuAction::AnalyzeAnother => "Analyze Another Image",
            MenuAction::Quit => "Quit",
        }
    }
}

/// 状態ごとに選べる操作（Idle と Submitting はメニューなし）
pub fn menu_for(mode: WorkflowMode) -> &'static [MenuAction] {
    match mode {
        WorkflowMode::ImageSelected => &[MenuAction::Analyze, MenuAction::ChangeImage, MenuAction::Quit],
        WorkflowMode::Failed => &[MenuAction::TryAgain, MenuAction::ChangeImage, MenuAction::Quit],
        WorkflowMode::ResultsReady => &[MenuAction::AnalyzeAnother, MenuAction::Quit],
        WorkflowMode::Idle | WorkflowMode::Submitting => &[],
    }
}

/// スピナーを表示しながら非同期処理を待つ
pub async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    spinner.finish_and_clear();
    output
}

fn prompt_menu(actions: &[MenuAction]) -> Result<MenuAction> {
    let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| SkinEvalError::CliExecution(e.to_string()))?;
    Ok(actions[index])
}

/// 画像パス入力（空入力または q で終了）
fn prompt_image_path() -> Result<Option<PathBuf>> {
    let input: String = Input::new()
        .with_prompt("画像ファイルのパス (q:終了)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SkinEvalError::CliExecution(e.to_string()))?;

    let trimmed = input.trim().trim_matches('"');
    match trimmed {
        "" | "q" | "Q" => Ok(None),
        path => Ok(Some(PathBuf::from(path))),
    }
}

fn print_intro() {
    println!("🩺 SkinEval - AI-Powered Skin Analysis\n");
    println!("⚠️ {}\n", MEDICAL_NOTICE);
    println!("📸 Photo Guidelines");
    for line in PHOTO_GUIDELINES {
        println!("  - {}", line);
    }
    println!();
}

/// 対話ループ
pub async fn run_interactive<A: Analyzer>(workflow: &Workflow<A>) -> Result<()> {
    print_intro();

    loop {
        let mode = workflow.view().mode;

        if mode == WorkflowMode::Idle {
            let Some(path) = prompt_image_path()? else {
                break;
            };
            match load_image(&path) {
                Ok(image) => {
                    workflow.select_and_preview(image).await?;
                    println!("{}\n", render(&workflow.view()));
                }
                Err(e) => println!("⚠️ {}\n", e),
            }
            continue;
        }

        match prompt_menu(menu_for(mode))? {
            MenuAction::Analyze | MenuAction::TryAgain => {
                with_spinner("Analyzing image with AI...", workflow.submit()).await?;
                println!("{}\n", render(&workflow.view()));
            }
            MenuAction::ChangeImage | MenuAction::AnalyzeAnother => workflow.reset(),
            MenuAction::Quit => break,
        }
    }

    workflow.reset();
    Ok(())
}
