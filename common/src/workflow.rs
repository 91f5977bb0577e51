//! 解析ワークフローの状態機械
//!
//! 画像選択 → 送信 → 結果/エラー → リセット のサイクルを管理する。
//! I/Oは持たず、非同期処理（プレビュー生成・HTTP送信）は呼び出し側が
//! チケットを受け取って実行し、結果を世代番号付きで戻す。
//!
//! 世代番号は `select_image` と `reset` のたびに進む。戻ってきた結果の
//! 世代が現在と一致しない場合は破棄する（後勝ち）。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, PreviewHandle, SelectedImage};

/// 非同期処理を識別する世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// 保持中の画像とプレビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldImage {
    pub image: SelectedImage,
    /// プレビュー生成が終わるまでは None
    pub preview: Option<PreviewHandle>,
}

/// ワークフロー状態（常にどれか1つ）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    ImageSelected(HeldImage),
    Submitting(HeldImage),
    ResultsReady(AnalysisResult),
    Failed { held: HeldImage, message: String },
}

impl WorkflowState {
    pub fn mode(&self) -> WorkflowMode {
        match self {
            WorkflowState::Idle => WorkflowMode::Idle,
            WorkflowState::ImageSelected(_) => WorkflowMode::ImageSelected,
            WorkflowState::Submitting(_) => WorkflowMode::Submitting,
            WorkflowState::ResultsReady(_) => WorkflowMode::ResultsReady,
            WorkflowState::Failed { .. } => WorkflowMode::Failed,
        }
    }

    pub fn held(&self) -> Option<&HeldImage> {
        match self {
            WorkflowState::ImageSelected(held)
            | WorkflowState::Submitting(held)
            | WorkflowState::Failed { held, .. } => Some(held),
            WorkflowState::Idle | WorkflowState::ResultsReady(_) => None,
        }
    }

    fn held_mut(&mut self) -> Option<&mut HeldImage> {
        match self {
            WorkflowState::ImageSelected(held)
            | WorkflowState::Submitting(held)
            | WorkflowState::Failed { held, .. } => Some(held),
            WorkflowState::Idle | WorkflowState::ResultsReady(_) => None,
        }
    }
}

/// 描画層向けの状態種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowMode {
    Idle,
    ImageSelected,
    Submitting,
    ResultsReady,
    Failed,
}

impl WorkflowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowMode::Idle => "idle",
            WorkflowMode::ImageSelected => "image-selected",
            WorkflowMode::Submitting => "submitting",
            WorkflowMode::ResultsReady => "results-ready",
            WorkflowMode::Failed => "failed",
        }
    }
}

/// 非同期処理の結果を適用したか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// 世代が古い、または状態が合わないため破棄した
    Stale,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// プレビュー生成の依頼
#[derive(Debug, Clone)]
pub struct PreviewTicket {
    pub generation: Generation,
    pub image: SelectedImage,
}

/// 送信の依頼（1チケット = 1リクエスト）
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: Generation,
    pub image: SelectedImage,
}

/// 描画層に渡すスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowView {
    pub mode: WorkflowMode,
    pub file_name: Option<String>,
    pub preview: Option<PreviewHandle>,
    pub can_submit: bool,
    pub is_loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
}

/// ワークフローコントローラ（状態機械）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowMachine {
    state: WorkflowState,
    generation: Generation,
}

impl WorkflowMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn mode(&self) -> WorkflowMode {
        self.state.mode()
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.state.held().map(|h| &h.image)
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.state.held().and_then(|h| h.preview.as_ref())
    }

    /// 画像を選択（どの状態からでも可）
    ///
    /// 以前の画像・結果・エラーは破棄され、送信中のリクエストの結果は
    /// 以後届いても適用されない。
    pub fn select_image(&mut self, image: SelectedImage) -> PreviewTicket {
        self.generation = self.generation.next();
        tracing::debug!(
            generation = self.generation.value(),
            file_name = %image.file_name,
            media_type = %image.media_type,
            bytes = image.len(),
            "image selected"
        );

        self.state = WorkflowState::ImageSelected(HeldImage {
            image: image.clone(),
            preview: None,
        });

        PreviewTicket {
            generation: self.generation,
            image,
        }
    }

    /// 生成済みプレビューを適用
    pub fn apply_preview(&mut self, generation: Generation, preview: PreviewHandle) -> Outcome {
        if generation != self.generation {
            tracing::debug!(
                stale = generation.value(),
                current = self.generation.value(),
                "discarding stale preview"
            );
            return Outcome::Stale;
        }

        match self.state.held_mut() {
            Some(held) => {
                held.preview = Some(preview);
                Outcome::Applied
            }
            None => Outcome::Stale,
        }
    }

    /// 送信開始
    ///
    /// `ImageSelected` または画像を保持した `Failed`（再試行）からのみ可能。
    /// それ以外では状態を変えずに前提条件エラーを返す。
    pub fn begin_submit(&mut self) -> Result<SubmitTicket> {
        let held = match std::mem::take(&mut self.state) {
            WorkflowState::ImageSelected(held) | WorkflowState::Failed { held, .. } => held,
            other => {
                let err = match other {
                    WorkflowState::Submitting(_) => Error::SubmitInProgress,
                    _ => Error::NoImageSelected,
                };
                self.state = other;
                return Err(err);
            }
        };

        let ticket = SubmitTicket {
            generation: self.generation,
            image: held.image.clone(),
        };
        self.state = WorkflowState::Submitting(held);
        tracing::debug!(generation = self.generation.value(), "submission started");
        Ok(ticket)
    }

    /// 送信結果を適用
    pub fn complete_submit(
        &mut self,
        generation: Generation,
        response: Result<AnalysisResult>,
    ) -> Outcome {
        if generation != self.generation || self.mode() != WorkflowMode::Submitting {
            tracing::debug!(
                stale = generation.value(),
                current = self.generation.value(),
                mode = self.mode().as_str(),
                "discarding stale response"
            );
            return Outcome::Stale;
        }

        let held = match std::mem::take(&mut self.state) {
            WorkflowState::Submitting(held) => held,
            other => {
                self.state = other;
                return Outcome::Stale;
            }
        };

        self.state = match response {
            Ok(result) => WorkflowState::ResultsReady(result),
            Err(err) => {
                tracing::warn!(error = %err, "analysis failed");
                WorkflowState::Failed {
                    held,
                    message: err.user_message(),
                }
            }
        };
        Outcome::Applied
    }

    /// すべてを破棄して `Idle` に戻る（常に成功）
    pub fn reset(&mut self) {
        self.generation = self.generation.next();
        self.state = WorkflowState::Idle;
    }

    /// 描画用スナップショット
    pub fn view(&self) -> WorkflowView {
        let held = self.state.held();
        let (result, error) = match &self.state {
            WorkflowState::ResultsReady(result) => (Some(result.clone()), None),
            WorkflowState::Failed { message, .. } => (None, Some(message.clone())),
            _ => (None, None),
        };

        WorkflowView {
            mode: self.mode(),
            file_name: held.map(|h| h.image.file_name.clone()),
            preview: held.and_then(|h| h.preview.clone()),
            can_submit: matches!(
                self.state,
                WorkflowState::ImageSelected(_) | WorkflowState::Failed { .. }
            ),
            is_loading: self.mode() == WorkflowMode::Submitting,
            result,
            error,
        }
    }
}
