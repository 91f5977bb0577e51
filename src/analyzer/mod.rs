//! 解析サービスとの接続部
//!
//! 状態機械は送信先を知らない。`Analyzer` を差し替えることで
//! 実HTTPとテスト用の実装を切り替える。

mod http;

pub use http::HttpAnalyzer;

use async_trait::async_trait;
use skin_eval_common::{AnalysisResult, SelectedImage};

/// 画像1枚を解析サービスへ送る
///
/// 1回の呼び出しで行う外部通信はちょうど1回。再試行はしない。
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, image: &SelectedImage) -> skin_eval_common::Result<AnalysisResult>;
}
