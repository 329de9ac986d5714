//! axum glue: header extraction and a request guard.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(strategy, require_signature));
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::strategy::SignatureStrategy;
use crate::types::Decision;

/// Raw `Authorization` header value, if present.
pub fn authorization_header(headers: &HeaderMap) -> Option<&[u8]> {
    headers
        .get(header::AUTHORIZATION)
        .map(HeaderValue::as_bytes)
}

impl SignatureStrategy {
    /// Decide on a request from its headers.
    pub fn authenticate_headers(&self, headers: &HeaderMap) -> Decision {
        self.authenticate_bytes(authorization_header(headers))
    }
}

/// Rejection for requests no tenant vouches for.
#[derive(Debug)]
pub struct Unauthorized {
    scheme: String,
}

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        if let Ok(challenge) = HeaderValue::from_str(&self.scheme) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }
        response
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// On success the matched tenant's [`crate::types::Credentials`] are inserted
/// into the request extensions.
pub async fn require_signature(
    State(strategy): State<SignatureStrategy>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Unauthorized> {
    let credentials = strategy
        .authenticate_headers(req.headers())
        .into_credentials()
        .ok_or_else(|| Unauthorized {
            scheme: strategy.scheme().to_string(),
        })?;

    req.extensions_mut().insert(credentials);

    Ok(next.run(req).await)
}
