use clap::Parser;
use skin_eval::{analyzer, cli, config, error, interactive, render, scanner, workflow};
use analyzer::HttpAnalyzer;
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SkinEvalError};
use skin_eval_common::WorkflowMode;
use tracing_subscriber::EnvFilter;
use workflow::Workflow;

fn init_logging(verbose: bool) {
    let default = if verbose { "skin_eval=debug,skin_eval_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, json, api_url } => {
            let analyzer = HttpAnalyzer::from_config(&config, api_url.as_deref())?;
            if !json {
                println!("🩺 SkinEval - 画像解析\n");
                println!("[1/2] 画像を読み込み中...");
            }

            let workflow = Workflow::new(analyzer);
            let selected = scanner::load_image(&image)?;
            workflow.select_and_preview(selected).await?;
            if !json {
                println!("✔ {}\n", render::render(&workflow.view()));
                println!("[2/2] 解析中... ({})", workflow.analyzer().url());
            }

            interactive::with_spinner("Analyzing image with AI...", workflow.submit()).await?;
            let view = workflow.view();

            match (view.mode, view.result) {
                (WorkflowMode::ResultsReady, Some(result)) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("{}", render::render_result(&result));
                    }
                }
                _ => {
                    let message = view.error.unwrap_or_default();
                    if !json {
                        println!("⚠️ {}", message);
                    }
                    return Err(SkinEvalError::AnalysisFailed(message));
                }
            }
        }

        Commands::Interactive { api_url } => {
            let analyzer = HttpAnalyzer::from_config(&config, api_url.as_deref())?;
            let workflow = Workflow::new(analyzer);
            interactive::run_interactive(&workflow).await?;
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIのURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIのURL: {}", config.api_url);
                println!("  使用するURL: {}", config.resolve_api_url(None));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
