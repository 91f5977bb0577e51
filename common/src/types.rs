//! 解析ワークフローの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedImage: ユーザーが選んだ画像（生バイト + MIMEタイプ）
//! - PreviewHandle: 表示専用のData URL
//! - AnalysisResult: 解析サービスから返された検証済みの結果

use crate::parser::{RawAlternative, RawAnalysis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 選択された画像
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// 送信・プレビューに使うMIMEタイプ（未申告なら application/octet-stream）
    pub fn effective_media_type(&self) -> &str {
        if self.media_type.trim().is_empty() {
            "application/octet-stream"
        } else {
            &self.media_type
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// バイト列をそのまま出すとログが埋まるので長さだけ表示する
impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// プレビュー用Data URL（"data:image/jpeg;base64,..."）
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(32).collect();
        write!(f, "PreviewHandle({}... {} chars)", head, self.0.len())
    }
}

/// 代替候補の疾患
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAlternative")]
pub struct Alternative {
    pub name: String,
    pub confidence: u8,
}

/// 解析結果
///
/// `confidence` はすべて 0..=100。`alternatives` はサーバーの順位のまま保持し、
/// クライアント側で並べ替えない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalysis")]
pub struct AnalysisResult {
    pub condition: String,
    pub confidence: u8,
    pub description: String,
    pub alternatives: Vec<Alternative>,
}

impl AnalysisResult {
    pub fn has_alternatives(&self) -> bool {
        !self.alternatives.is_empty()
    }
}
