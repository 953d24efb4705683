//! Path traversal guard
//!
//! Record identifiers travel in the URL path, so any request with a `.` or
//! `..` segment (plain or percent-encoded) is refused before routing.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

fn has_dot_segments(path: &str) -> bool {
    path.split('/').any(is_dot_segment)
}

pub async fn path_guard_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if has_dot_segments(request.uri().path()) {
        tracing::warn!(path = %request.uri().path(), "Rejected dot segment in path");
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(next.run(request).await)
}
