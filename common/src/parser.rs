//! APIレスポンスパーサー
//!
//! 解析サービスのレスポンスを型付きの `AnalysisResult` に変換する。
//! 形が合わないレスポンスは部分的に受け入れず、必ず
//! `Error::MalformedResponse` として返す。

use crate::error::{Error, Result, FALLBACK_REJECTION_MESSAGE};
use crate::types::{Alternative, AnalysisResult};
use serde::Deserialize;

/// 信頼度の上限（パーセント）
pub const MAX_CONFIDENCE: i64 = 100;

/// 検証前のレスポンス本文
///
/// `AnalysisResult` のデシリアライズもここを経由するので、
/// 範囲外の信頼度はどの経路からも入らない。
#[derive(Deserialize)]
pub(crate) struct RawAnalysis {
    condition: String,
    confidence: i64,
    description: String,
    #[serde(default)]
    alternatives: Option<Vec<RawAlternative>>,
}

#[derive(Deserialize)]
pub(crate) struct RawAlternative {
    name: String,
    confidence: i64,
}

fn checked_confidence(value: i64, field: &str) -> Result<u8> {
    if (0..=MAX_CONFIDENCE).contains(&value) {
        Ok(value as u8)
    } else {
        Err(Error::MalformedResponse(format!(
            "{} は 0..=100 の範囲外です: {}",
            field, value
        )))
    }
}

impl TryFrom<RawAlternative> for Alternative {
    type Error = Error;

    fn try_from(raw: RawAlternative) -> Result<Self> {
        Ok(Alternative {
            confidence: checked_confidence(raw.confidence, "confidence")?,
            name: raw.name,
        })
    }
}

impl TryFrom<RawAnalysis> for AnalysisResult {
    type Error = Error;

    fn try_from(raw: RawAnalysis) -> Result<Self> {
        let confidence = checked_confidence(raw.confidence, "confidence")?;

        let alternatives = raw
            .alternatives
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, alt)| {
                let field = format!("alternatives[{}].confidence", i);
                Ok(Alternative {
                    confidence: checked_confidence(alt.confidence, &field)?,
                    name: alt.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisResult {
            condition: raw.condition,
            confidence,
            description: raw.description,
            alternatives,
        })
    }
}

/// 成功レスポンス（2xx）の本文をパース
///
/// # Arguments
/// * `body` - レスポンス本文（JSON）
///
/// # Returns
/// * `Ok(AnalysisResult)` - すべてのフィールドが揃い、信頼度が範囲内
/// * `Err(Error::MalformedResponse)` - 欠落・型違い・範囲外を含む場合
///
/// `alternatives` は欠落・`null`・空配列をすべて空として扱う。
///
/// # Examples
/// ```
/// use skin_eval_common::parse_analysis_response;
///
/// let body = r#"{"condition":"Eczema","confidence":82,"description":"..."}"#;
/// let result = parse_analysis_response(body).unwrap();
/// assert_eq!(result.confidence, 82);
/// assert!(result.alternatives.is_empty());
/// ```
pub fn parse_analysis_response(body: &str) -> Result<AnalysisResult> {
    let raw: RawAnalysis = serde_json::from_str(body.trim())
        .map_err(|e| Error::MalformedResponse(format!("JSONパースエラー: {}", e)))?;

    AnalysisResult::try_from(raw)
}

/// エラーレスポンスの本文から表示用メッセージを取り出す
///
/// `message` → `error` の順に、空でない文字列を探す。
pub fn parse_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// ステータスコードと本文から解析結果を判定
pub fn interpret_response(status: u16, body: &str) -> Result<AnalysisResult> {
    if (200..300).contains(&status) {
        return parse_analysis_response(body);
    }

    let message = parse_error_message(body).unwrap_or_else(|| FALLBACK_REJECTION_MESSAGE.to_string());
    Err(Error::RemoteRejection { status, message })
}
