//! Request body and path extractors that reject with [`AppError`].
//!
//! axum's stock `Json`, `Multipart`, and `Path` extractors answer a bad
//! request with a plain-text 4xx. These wrappers route the rejection through
//! [`AppError`] so every client error carries the `{ "error", "code" }` body.

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};

use crate::error::AppError;

/// JSON body extractor; a malformed or mistyped body is 400 `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameter extractor; an unparsable segment is 400 `BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `multipart/form-data` extractor; a wrong content type or missing boundary
/// is 400 `BAD_REQUEST`.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(AppMultipart)
            .map_err(AppError::from)
    }
}
