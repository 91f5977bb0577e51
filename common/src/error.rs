//! エラー型定義
//!
//! 解析ワークフローの失敗はすべてここで分類する:
//! - 前提条件エラー（画像未選択・送信中）: 状態を変えずに呼び出し元へ返す
//! - リモート拒否・通信失敗・不正レスポンス: `Failed` 状態のメッセージになる

use thiserror::Error;

/// ステータスが非2xxでメッセージを取り出せなかった場合の文言
pub const FALLBACK_REJECTION_MESSAGE: &str = "Failed to analyze image";

/// 通信失敗時にユーザーへ表示する文言
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to analyze image. Please try again.";

/// レスポンス形式不正時にユーザーへ表示する文言
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Failed to read analysis results. Please try again.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Please select an image first")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    SubmitInProgress,

    #[error("{message}")]
    RemoteRejection { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// `submit` の前提条件エラーか（状態遷移も通信も発生しない）
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::NoImageSelected | Error::SubmitInProgress)
    }

    /// `Failed` 状態で表示するメッセージ
    ///
    /// 通信失敗と不正レスポンスは内部詳細を出さず固定文言にする。
    pub fn user_message(&self) -> String {
        match self {
            Error::RemoteRejection { message, .. } => message.clone(),
            Error::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            Error::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            Error::NoImageSelected | Error::SubmitInProgress => self.to_string(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
