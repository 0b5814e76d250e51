use uuid::Uuid;
use chrono::Duration;
use actix_web::HttpRequest;
use actix_web::cookie::{time, Cookie};

pub const SESSION_COOKIE: &str = "session_id";

/// The session id carried by the request, if it parses as a UUID.
pub fn session_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn session_cookie(session_id: Uuid, lifetime: Duration) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(lifetime.num_seconds()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn cookie_round_trips_through_request() {
        let id = Uuid::new_v4();
        let cookie = session_cookie(id, Duration::seconds(60));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(session_id(&req), Some(id));
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "not-a-uuid"))
            .to_http_request();
        assert_eq!(session_id(&req), None);
    }
}
