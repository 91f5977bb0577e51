//! reqwestによる解析API呼び出し
//!
//! `POST {base_url}/analyze` に multipart（パート名 `image`）で画像を送る。

use super::Analyzer;
use crate::config::Config;
use crate::error::{Result, SkinEvalError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use skin_eval_common::{analyze_url, interpret_response, AnalysisResult, Error, SelectedImage, IMAGE_PART};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    client: Client,
    url: String,
}

impl HttpAnalyzer {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkinEvalError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: analyze_url(base_url),
        })
    }

    pub fn from_config(config: &Config, api_url_override: Option<&str>) -> Result<Self> {
        let base_url = config.resolve_api_url(api_url_override);
        Self::new(&base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 申告されたMIMEタイプが解釈できない場合はタイプなしで送る（判定はサーバー任せ）
    fn build_form(image: &SelectedImage) -> Form {
        let part = || Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        let part = match part().mime_str(image.effective_media_type()) {
            Ok(part) => part,
            Err(e) => {
                warn!(media_type = %image.media_type, error = %e, "unparseable media type, sending untyped part");
                part()
            }
        };
        Form::new().part(IMAGE_PART, part)
    }
}

#[async_trait]
impl Analyzer for HttpAnalyzer {
    async fn analyze(&self, image: &SelectedImage) -> skin_eval_common::Result<AnalysisResult> {
        let form = Self::build_form(image);

        info!(url = %self.url, file_name = %image.file_name, bytes = image.len(), "sending image for analysis");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "analysis request failed");
                Error::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("レスポンス読み込み失敗: {}", e)))?;

        debug!(status = status.as_u16(), body_len = body.len(), "analysis response received");

        interpret_response(status.as_u16(), &body)
    }
}
