use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-eval")]
#[command(about = "AI skin photo analysis client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像1枚を解析して結果を表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 解析APIのベースURL（設定・環境変数より優先）
        #[arg(long)]
        api_url: Option<String>,
    },

    /// 対話モードで画像を選択・解析
    Interactive {
        /// 解析APIのベースURL（設定・環境変数より優先）
        #[arg(long)]
        api_url: Option<String>,
    },

    /// 設定管理
    Config {
        /// 解析APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// リクエストのタイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
