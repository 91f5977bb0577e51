use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinEvalError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析に失敗しました: {0}")]
    AnalysisFailed(String),

    #[error("対話入力エラー: {0}")]
    CliExecution(String),

    #[error("非同期タスクエラー: {0}")]
    Task(String),

    #[error(transparent)]
    Workflow(#[from] skin_eval_common::Error),
}

impl SkinEvalError {
    /// ワークフロー由来の前提条件エラーか
    pub fn is_precondition(&self) -> bool {
        matches!(self, SkinEvalError::Workflow(e) if e.is_precondition())
    }
}

pub type Result<T> = std::result::Result<T, SkinEvalError>;
