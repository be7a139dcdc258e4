use serde_json::{Value, json};
use warp::Filter;
use warp::http::StatusCode;

pub const SESSION_COOKIE: &str = "JSESSIONID=abc123";

/// Login and logout endpoints of a mock Jira. Only the password "secret" is
/// accepted.
pub fn session_routes() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let login = warp::path!("rest" / "auth" / "1" / "session")
        .and(warp::post())
        .and(warp::body::json())
        .map(|body: Value| {
            if body["password"] == "secret" {
                warp::reply::with_status(
                    warp::reply::json(&json!({
                        "session": { "name": "JSESSIONID", "value": "abc123" }
                    })),
                    StatusCode::OK,
                )
            } else {
                warp::reply::with_status(
                    warp::reply::json(&json!({ "errorMessages": ["Login failed"] })),
                    StatusCode::UNAUTHORIZED,
                )
            }
        });
    let logout = warp::path!("rest" / "auth" / "1" / "session")
        .and(warp::delete())
        .and(warp::header::exact("cookie", SESSION_COOKIE))
        .map(|| warp::reply::with_status(warp::reply(), StatusCode::NO_CONTENT));
    login.or(logout)
}
