use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
};

use parlor_types::api::Credentials;

/// How the client sent its body, and so how it expects the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json`: answered with JSON.
    Json,
    /// Browser form post: answered with redirects or pages.
    Form,
}

/// Credentials read from either a JSON or a url-encoded form body.
#[derive(Debug)]
pub struct CredentialsBody {
    pub credentials: Credentials,
    pub format: BodyFormat,
}

impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(credentials) = Json::<Credentials>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self {
                credentials,
                format: BodyFormat::Json,
            })
        } else {
            let Form(credentials) = Form::<Credentials>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self {
                credentials,
                format: BodyFormat::Form,
            })
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
}
