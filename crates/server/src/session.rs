use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "recipe_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reads the session id from the request's `Cookie` headers, if one is
    /// present and well formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(Self)
    }

    pub fn set_cookie(&self) -> Option<HeaderValue> {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.0.as_hyphenated()
        );
        HeaderValue::from_str(&cookie).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_session_from_cookie_list() {
        let session = SessionId::generate();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={}", session.0))
                .expect("header"),
        );
        assert_eq!(SessionId::from_headers(&headers), Some(session));
    }

    #[test]
    fn ignores_malformed_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("recipe_session=not-a-uuid"),
        );
        assert_eq!(SessionId::from_headers(&headers), None);
    }

    #[test]
    fn set_cookie_round_trips_through_request_header() {
        let session = SessionId::generate();
        let set_cookie = session.set_cookie().expect("cookie");
        let pair = set_cookie
            .to_str()
            .expect("ascii")
            .split(';')
            .next()
            .expect("pair")
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).expect("header"));
        assert_eq!(SessionId::from_headers(&headers), Some(session));
        assert!(set_cookie.to_str().expect("ascii").contains("HttpOnly"));
    }

    #[test]
    fn set_cookie_is_never_blank() {
        let cookie = SessionId::generate().set_cookie().expect("cookie");
        let text = cookie.to_str().expect("ascii");
        assert!(text.starts_with(&format!("{SESSION_COOKIE}=")));
        assert!(text.len() > SESSION_COOKIE.len() + 1);
    }
}
