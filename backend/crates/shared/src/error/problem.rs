//! Problem Detail - RFC 7807 error response body
//!
//! Defines the [`ProblemDetail`] document returned for every rejected
//! request, served as `application/problem+json`.

use serde::Serialize;
use uuid::Uuid;

use super::app_error::AppError;

/// `application/problem+json` メディアタイプ
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// 問題タイプ URI のベース
const PROBLEM_TYPE_BASE: &str = "https://wishlist.example.com/problems/";

/// 5xx エラーをマスクする際の汎用メッセージ
const MASKED_DETAIL: &str = "An error occurred while processing your request";

/// RFC 7807 Problem Details for HTTP APIs
///
/// すべての拒否応答の本文となる構造化エラードキュメントです。
///
/// ## Fields
/// * `type` - 問題カテゴリを識別する URI
/// * `title` - 問題種別の短い要約
/// * `status` - HTTP ステータスコード
/// * `detail` - この発生固有の説明
/// * `correlation_id` - 応答ごとに一意なトレース用 ID（UUID v4）
/// * `instance` - 問題が発生したリクエスト URI（オプション）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetail {
    /// 新しい問題ドキュメントを作成
    ///
    /// `correlation_id` は呼び出しごとに新しい UUID v4 が採番されます。
    pub fn new(
        slug: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            type_uri: format!("{PROBLEM_TYPE_BASE}{slug}"),
            title: title.into(),
            status,
            detail: detail.into(),
            correlation_id: Uuid::new_v4().to_string(),
            instance: None,
        }
    }

    /// リクエスト URI を設定
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// [`AppError`] から問題ドキュメントを構築
    ///
    /// サーバーエラー（5xx）の `detail` はリリースビルドでは汎用メッセージに
    /// 置き換えられ、内部情報を漏らしません。デバッグビルドでは元の
    /// メッセージを保持します。
    pub fn from_app_error(err: &AppError) -> Self {
        let masked = err.is_server_error() && !cfg!(debug_assertions);

        if masked {
            Self {
                type_uri: "about:blank".to_string(),
                title: err.kind().as_str().to_string(),
                status: err.status_code(),
                detail: MASKED_DETAIL.to_string(),
                correlation_id: Uuid::new_v4().to_string(),
                instance: None,
            }
        } else {
            Self::new(
                err.problem_slug(),
                err.kind().as_str(),
                err.status_code(),
                err.message(),
            )
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDetail {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{StatusCode, header};
        use axum::response::IntoResponse;

        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(self),
        )
            .into_response()
    }
}
