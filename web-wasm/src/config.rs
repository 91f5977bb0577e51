//! ビルド時設定

use skin_eval_common::DEFAULT_API_URL;

/// 解析APIのベースURL（ビルド時の SKIN_EVAL_API_URL、未指定なら既定値）
pub fn api_base_url() -> &'static str {
    resolve(option_env!("SKIN_EVAL_API_URL"))
}

fn resolve(value: Option<&'static str>) -> &'static str {
    value
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}
