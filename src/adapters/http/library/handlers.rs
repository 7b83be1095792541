//! HTTP handlers for entitlement listing and gated downloads.

use axum::body::Body;
use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{AppState, ErrorResponse};
use crate::application::handlers::{DownloadAssetQuery, ListEntitlementsQuery};
use crate::domain::library::LibraryError;

/// GET /api/entitlements - Caller's entitlement rows, as stored
pub async fn list_entitlements(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<impl IntoResponse, LibraryApiError> {
    let result = state
        .list_entitlements_handler()
        .handle(ListEntitlementsQuery { identity })
        .await?;

    Ok(Json(result.rows))
}

/// GET /api/docs/{slug}/download - Stream an entitled document
pub async fn download(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(slug): Path<String>,
) -> Result<Response, LibraryApiError> {
    let result = state
        .download_asset_handler()
        .handle(DownloadAssetQuery { identity, slug })
        .await?;

    let mut response = Response::new(Body::from_stream(result.asset.stream));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(result.binding.content_type()),
    );
    if let Ok(disposition) = HeaderValue::from_str(&result.binding.content_disposition()) {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    if let Some(len) = result.asset.len {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("private, no-store"));

    Ok(response)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct LibraryApiError(LibraryError);

impl From<LibraryError> for LibraryApiError {
    fn from(err: LibraryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LibraryApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LibraryError::UnknownSlug(_) | LibraryError::FileMissing { .. } => {
                StatusCode::NOT_FOUND
            }
            LibraryError::NotEntitled { .. } => StatusCode::FORBIDDEN,
            LibraryError::Store(_) => StatusCode::BAD_GATEWAY,
            LibraryError::InvalidBinding { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            tracing::error!(code = self.0.code(), error = %self.0, "library request failed");
            "Document service unavailable".to_string()
        } else {
            self.0.message()
        };

        ErrorResponse::new(self.0.code(), message).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_expected_statuses() {
        let cases = [
            (LibraryError::unknown_slug("x"), StatusCode::NOT_FOUND),
            (LibraryError::file_missing("x", "x.pdf"), StatusCode::NOT_FOUND),
            (LibraryError::not_entitled("x"), StatusCode::FORBIDDEN),
            (LibraryError::store("down"), StatusCode::BAD_GATEWAY),
            (LibraryError::invalid_binding("x", "bad"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(LibraryApiError::from(err).into_response().status(), expected);
        }
    }
}
