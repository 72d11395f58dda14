//! The `token` session cookie.
//!
//! Set on login with `HttpOnly` and `SameSite=Strict`, cleared on logout.

/// Name of the cookie carrying the session JWT.
pub const SESSION_COOKIE: &str = "token";

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Strict"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Extract the session token from a `Cookie` request header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
