//! 非同期ワークフロードライバ
//!
//! `WorkflowMachine` をMutexで包み、プレビュー生成と解析リクエストを
//! 非同期で実行する。ロックはawaitをまたいで保持しない。

use crate::analyzer::Analyzer;
use crate::error::{Result, SkinEvalError};
use skin_eval_common::{
    derive_preview, Outcome, PreviewTicket, SelectedImage, WorkflowMachine, WorkflowState,
    WorkflowView,
};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

pub struct Workflow<A> {
    machine: Mutex<WorkflowMachine>,
    analyzer: A,
}

impl<A: Analyzer> Workflow<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            machine: Mutex::new(WorkflowMachine::new()),
            analyzer,
        }
    }

    // 状態機械の操作はpanicしないので、poisonedでも中身はそのまま使える
    fn machine(&self) -> MutexGuard<'_, WorkflowMachine> {
        self.machine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// 画像を選択（プレビューは `load_preview` で別途生成）
    pub fn select_image(&self, image: SelectedImage) -> PreviewTicket {
        self.machine().select_image(image)
    }

    /// プレビューを生成して適用
    ///
    /// 生成中に別の画像が選ばれた・リセットされた場合は破棄される。
    pub async fn load_preview(&self, ticket: PreviewTicket) -> Result<Outcome> {
        let PreviewTicket { generation, image } = ticket;
        let preview = tokio::task::spawn_blocking(move || derive_preview(&image))
            .await
            .map_err(|e| SkinEvalError::Task(e.to_string()))?;

        Ok(self.machine().apply_preview(generation, preview))
    }

    pub async fn select_and_preview(&self, image: SelectedImage) -> Result<Outcome> {
        let ticket = self.select_image(image);
        self.load_preview(ticket).await
    }

    /// 保持中の画像を解析サービスへ送る
    ///
    /// 前提条件エラー（画像なし・送信中）は通信せずに即座に返す。
    /// 通信・サーバー側の失敗は `Failed` 状態として記録され、`Ok` で返る。
    pub async fn submit(&self) -> Result<Outcome> {
        let ticket = self.machine().begin_submit()?;

        info!(
            generation = ticket.generation.value(),
            file_name = %ticket.image.file_name,
            "submitting image"
        );
        let response = self.analyzer.analyze(&ticket.image).await;

        Ok(self.machine().complete_submit(ticket.generation, response))
    }

    pub fn reset(&self) {
        self.machine().reset();
    }

    pub fn view(&self) -> WorkflowView {
        self.machine().view()
    }

    pub fn state(&self) -> WorkflowState {
        self.machine().state().clone()
    }
}
