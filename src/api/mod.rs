//! API route definitions.
//!
//! Health endpoints live at the API root; the listing endpoints are public
//! and sit under `/public`.

pub mod doctors;
pub mod health;
pub mod specialties;

use axum::Router;
use axum::http::Uri;

use crate::app::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).nest("/public", public_router())
}

fn public_router() -> Router<AppState> {
    Router::new()
        .merge(doctors::router())
        .merge(specialties::router())
}

/// The request's own absolute URL, used as the base for navigation links.
/// Scheme is fixed to http; TLS terminates at the proxy in front of us.
pub(crate) fn request_url(host: &str, uri: &Uri) -> String {
    format!("http://{}{}", host, uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_keeps_path_and_query() {
        let uri: Uri = "/api/public/doctors?page=2&name=smith".parse().unwrap();
        assert_eq!(
            request_url("example.com", &uri),
            "http://example.com/api/public/doctors?page=2&name=smith"
        );
    }
}
