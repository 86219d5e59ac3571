use actix_web::HttpRequest;
use subtle::ConstantTimeEq;

/// Pull the token out of a `Authorization: Bearer <token>` header.
/// Returns `None` when the header is missing or not in bearer form.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let auth = req.headers().get("authorization")?.to_str().ok()?;
    let mut parts = auth.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

/// Constant-time string comparison for secrets and note passwords.
pub fn secrets_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
