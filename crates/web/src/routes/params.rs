//! Path parameter extractors.

use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
};

use crate::error::AppError;

/// A record id taken from the URL path.
///
/// An id segment that is not an integer (or overflows one) names no record,
/// so it is answered with 404 like any other unknown id.
///
/// ```rust,ignore
/// async fn show(IdPath(shop_id): IdPath<ShopId>) -> impl IntoResponse {
///     format!("shop {shop_id}")
/// }
/// ```
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: From<i64> + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(T::from(id))),
            Err(PathRejection::FailedToDeserializePathParams(e)) => {
                tracing::debug!(path = %parts.uri.path(), error = %e, "Unparseable id in path");
                Err(AppError::NotFound("no such record".to_string()))
            }
            Err(e) => Err(AppError::Internal(e.body_text())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use shopkeep_core::ShopId;

    use super::*;

    async fn echo(IdPath(id): IdPath<ShopId>) -> String {
        id.to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route("/shop/{id}", get(echo));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_integer_id_is_extracted() {
        assert_eq!(status_for("/shop/42").await, StatusCode::OK);
        assert_eq!(status_for("/shop/-3").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_integer_id_is_not_found() {
        assert_eq!(status_for("/shop/abc").await, StatusCode::NOT_FOUND);
        assert_eq!(status_for("/shop/1.5").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_for("/shop/99999999999999999999").await,
            StatusCode::NOT_FOUND
        );
    }
}
