pub mod books;
pub mod cart;
pub mod orders;

use actix_web::HttpRequest;

use crate::errors::AppError;

/// Header carrying the opaque per-browser-session token that keys the cart.
/// The token is issued by the caller, never by this service.
pub const SESSION_HEADER: &str = "X-Session-Id";

pub(crate) fn session_id(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", SESSION_HEADER)))
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::{session_id, SESSION_HEADER};
    use crate::errors::AppError;

    #[test]
    fn session_token_is_read_from_the_header() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "session-abc"))
            .to_http_request();
        assert_eq!(session_id(&req).unwrap(), "session-abc");
    }

    #[test]
    fn missing_header_is_a_bad_request() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(session_id(&req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn blank_header_is_a_bad_request() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "   "))
            .to_http_request();
        assert!(matches!(session_id(&req), Err(AppError::BadRequest(_))));
    }
}
