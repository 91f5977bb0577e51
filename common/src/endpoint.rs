//! 解析エンドポイントの定数とURL組み立て

/// 既定のAPIベースURL
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// 解析APIのパス
pub const ANALYZE_PATH: &str = "/analyze";

/// multipartのパート名
pub const IMAGE_PART: &str = "image";

/// ベースURLから解析APIのURLを組み立てる
///
/// ```
/// use skin_eval_common::analyze_url;
///
/// assert_eq!(analyze_url("http://localhost:3001/"), "http://localhost:3001/analyze");
/// ```
pub fn analyze_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), ANALYZE_PATH)
}
