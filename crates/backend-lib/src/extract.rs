//! Request body extraction.
use axum::{
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;
use crate::error::AppError;

/// Body extractor accepting either `application/json` or
/// `application/x-www-form-urlencoded`.
///
/// Anything that is not form-encoded is parsed as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| reject(rejection.status(), rejection.body_text()))?;
            return Ok(Self(value));
        }

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| reject(rejection.status(), rejection.body_text()))?;
        Ok(Self(value))
    }
}

fn reject(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidInput(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use boxdepot_common::Credentials;
    use tower::ServiceExt;

    async fn echo(JsonOrForm(credentials): JsonOrForm<Credentials>) -> String {
        format!("{}:{}", credentials.username, credentials.password)
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(content_type: &str, body: &'static str) -> (StatusCode, String) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_json() {
        let (status, body) = send("application/json", r#"{"username":"alice","password":"secret1"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice:secret1");
    }

    #[tokio::test]
    async fn test_accepts_form() {
        let (status, body) = send(
            "application/x-www-form-urlencoded",
            "username=alice&password=secret%211",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "alice:secret!1");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = send("application/json", r#"{"username":"alice""#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VAL_001"));
    }
}
