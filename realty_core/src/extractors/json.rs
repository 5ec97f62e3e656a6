//! JSON extractor whose rejections use the application error body

use crate::error::AppError;
use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON format".to_string(),
        JsonRejection::JsonDataError(err) => format!("Invalid form data: {}", err.body_text()),
        _ => "Failed to parse JSON request".to_string(),
    };
    tracing::debug!(rejection = %rejection, "rejected JSON body");
    AppError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormInput;
    use axum::http::header::CONTENT_TYPE;

    #[tokio::test]
    async fn test_accepts_flat_string_map() {
        let request = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"firstName":"Jane","email":"jane@example.com"}"#))
            .unwrap();

        let AppJson(input) = AppJson::<FormInput>::from_request(request, &()).await.unwrap();
        assert_eq!(input.get("firstName"), "Jane");
    }

    #[tokio::test]
    async fn test_rejects_non_string_values() {
        let request = Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"firstName":42}"#))
            .unwrap();

        let error = AppJson::<FormInput>::from_request(request, &()).await.err().unwrap();
        assert!(matches!(error, AppError::BadRequest(msg) if msg.starts_with("Invalid form data")));
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let request = Request::builder().body(Body::from("{}")).unwrap();

        let error = AppJson::<FormInput>::from_request(request, &()).await.err().unwrap();
        assert!(matches!(error, AppError::BadRequest(_)));
    }
}
