//! Response construction for the documentation server.

use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use http::header::{HeaderName, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use http::{HeaderValue, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Body as HttpBody;

/// Every response body is fully buffered.
pub type Body = Full<Bytes>;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

fn empty() -> Body {
    Full::new(Bytes::new())
}

/// A `200 OK` carrying `body` as `content_type`.
pub fn file(content_type: &str, body: Vec<u8>) -> Response<Body> {
    with_header(Response::new(Full::new(Bytes::from(body))), CONTENT_TYPE, content_type)
}

pub fn html(status: StatusCode, body: String) -> Response<Body> {
    let mut response = file("text/html; charset=utf-8", body.into_bytes());
    *response.status_mut() = status;
    response
}

/// A small HTML error page.
pub fn error(status: StatusCode, message: &str) -> Response<Body> {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n\
         <head><meta charset=\"utf-8\"><title>Error {code}</title></head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape_html(message),
    );
    html(status, body)
}

pub fn redirect(location: &str) -> Response<Body> {
    let mut response = Response::new(empty());
    *response.status_mut() = StatusCode::MOVED_PERMANENTLY;
    with_header(response, LOCATION, location)
}

pub fn not_modified(last_modified: DateTime<Utc>) -> Response<Body> {
    let mut response = Response::new(empty());
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    with_header(response, LAST_MODIFIED, &http_date(last_modified))
}

/// Sets a header, dropping values that are not valid header text.
pub fn with_header(mut response: Response<Body>, name: HeaderName, value: &str) -> Response<Body> {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            response.headers_mut().insert(name, value);
        }
        Err(_) => tracing::warn!("Dropping invalid {} header value {:?}", name, value),
    }
    response
}

/// The reply to a `HEAD` request: same head, explicit length, no body.
pub fn without_body(response: Response<Body>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    if parts.status != StatusCode::NOT_MODIFIED {
        if let Some(length) = body.size_hint().exact() {
            parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        }
    }
    Response::from_parts(parts, empty())
}

pub fn http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE).to_string()
}

pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
