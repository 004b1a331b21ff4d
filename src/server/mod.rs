//! A small static-file HTTP server for the documentation tree.
//!
//! Connections are driven by hyper's HTTP/1 server with keep-alive off, so
//! each connection carries exactly one request. Only `GET` and `HEAD` are
//! supported; the tree is never modified.

pub mod content;
pub mod listing;
pub mod resolve;
pub mod response;

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use http::header::{CONNECTION, IF_MODIFIED_SINCE, LAST_MODIFIED, SERVER};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::{TcpListener, TcpStream};

use crate::core::DocsError;
use response::{http_date, parse_http_date, Body};

/// How long a client may take to send its request head.
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

const SERVER_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Index files tried, in order, when a directory is requested.
const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// A bound documentation server that is not yet accepting connections.
pub struct DocServer {
    listener: TcpListener,
    root: Arc<PathBuf>,
}

impl DocServer {
    /// Binds `host:port`. Port `0` picks a free port.
    pub async fn bind(root: impl Into<PathBuf>, host: &str, port: u16) -> Result<Self, DocsError> {
        let addr = format!("{host}:{port}");
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|source| DocsError::Bind { addr, source })?;
        Ok(Self {
            listener,
            root: Arc::new(root.into()),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DocsError> {
        self.listener
            .local_addr()
            .map_err(|e| DocsError::Io(e, self.root.as_ref().clone()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accepts connections until `shutdown` resolves. An error from
    /// `shutdown` ends the loop and is reported as [`DocsError::Signal`].
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), DocsError>
    where
        F: Future<Output = io::Result<()>>,
    {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                signal = &mut shutdown => {
                    tracing::info!("Shutting down documentation server");
                    return signal.map_err(DocsError::Signal);
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let root = Arc::clone(&self.root);
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(stream, root).await {
                                tracing::debug!(%peer, "Connection ended with an error: {}", e);
                            }
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                    }
                },
            }
        }
    }
}

/// Malformed request heads are answered with `400` by hyper itself and
/// surface here as the connection error.
async fn serve_connection(stream: TcpStream, root: Arc<PathBuf>) -> Result<(), hyper::Error> {
    let service = service_fn(move |request: Request<Incoming>| {
        let root = Arc::clone(&root);
        async move { Ok::<_, Infallible>(handle(&root, request).await) }
    });

    http1::Builder::new()
        .keep_alive(false)
        .timer(TokioTimer::new())
        .header_read_timeout(READ_TIMEOUT)
        .serve_connection(TokioIo::new(stream), service)
        .await
}

async fn handle(root: &Path, request: Request<Incoming>) -> Response<Body> {
    // Bodies are never read; dropping it keeps the request `Sync`.
    let request = request.map(|_| ());
    let mut reply = respond(root, &request).await;

    tracing::info!(
        method = %request.method(),
        target = %request.uri(),
        status = reply.status().as_u16(),
        "Served request"
    );

    let headers = reply.headers_mut();
    headers.insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    if *request.method() == Method::HEAD {
        reply = response::without_body(reply);
    }
    reply
}

/// Builds the response for one request against the tree at `root`.
pub async fn respond(root: &Path, request: &Request<()>) -> Response<Body> {
    let method = request.method();
    if *method != Method::GET && *method != Method::HEAD {
        return response::error(
            StatusCode::NOT_IMPLEMENTED,
            &format!("Unsupported method ({method})"),
        );
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|target| target.as_str())
        .unwrap_or("/");
    let resolved = match resolve::resolve(root, target) {
        Ok(resolved) => resolved,
        Err(_) => return response::error(StatusCode::BAD_REQUEST, "Invalid request path."),
    };

    let mut path = resolved.path.clone();
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(_) => return response::error(StatusCode::NOT_FOUND, "File not found."),
    };

    if metadata.is_dir() {
        if !resolved.trailing_slash {
            return response::redirect(&resolved.directory_location());
        }
        match find_index(&path).await {
            Some(index) => path = index,
            None => return directory_listing(&path, &resolved.url_path).await,
        }
    } else if resolved.trailing_slash {
        return response::error(StatusCode::NOT_FOUND, "File not found.");
    }

    serve_file(&path, request).await
}

async fn find_index(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if tokio::fs::metadata(&candidate)
            .await
            .is_ok_and(|m| m.is_file())
        {
            return Some(candidate);
        }
    }
    None
}

async fn directory_listing(dir: &Path, url_path: &str) -> Response<Body> {
    match listing::read_entries(dir).await {
        Ok(entries) => response::html(StatusCode::OK, listing::render(url_path, &entries)),
        Err(e) => {
            tracing::warn!("Failed to list {:?}: {}", dir, e);
            response::error(StatusCode::NOT_FOUND, "No permission to list directory.")
        }
    }
}

async fn serve_file(path: &Path, request: &Request<()>) -> Response<Body> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(_) => return response::error(StatusCode::NOT_FOUND, "File not found."),
    };
    let modified = metadata.modified().ok().map(truncate_to_seconds);

    let since = request
        .headers()
        .get(IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date);
    if let (Some(modified), Some(since)) = (modified, since) {
        if modified <= since {
            return response::not_modified(modified);
        }
    }

    let body = match tokio::fs::read(path).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}", path, e);
            return response::error(StatusCode::NOT_FOUND, "File not found.");
        }
    };

    let reply = response::file(&content::content_type(path), body);
    match modified {
        Some(modified) => response::with_header(reply, LAST_MODIFIED, &http_date(modified)),
        None => reply,
    }
}

fn truncate_to_seconds(time: SystemTime) -> DateTime<Utc> {
    let time = DateTime::<Utc>::from(time);
    DateTime::from_timestamp(time.timestamp(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::LOCATION;
    use std::fs;

    fn request(method: Method, target: &str) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(target)
            .body(())
            .unwrap()
    }

    fn docs_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ref")).unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Home</h1>").unwrap();
        fs::write(dir.path().join("ref/index.html"), "<h1>ref</h1>").unwrap();
        dir
    }

    async fn location_for(root: &Path, target: &str) -> String {
        let reply = respond(root, &request(Method::GET, target)).await;
        assert_eq!(reply.status(), StatusCode::MOVED_PERMANENTLY, "target {target:?}");
        reply
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[tokio::test]
    async fn directory_redirects_stay_on_this_server() {
        let tree = docs_tree();

        assert_eq!(location_for(tree.path(), "//evil.example:80/..").await, "/");
        assert_eq!(location_for(tree.path(), "/\\evil.example/..").await, "/");
        assert_eq!(location_for(tree.path(), "///ref?x=1").await, "/ref/?x=1");
        assert_eq!(location_for(tree.path(), "/ref").await, "/ref/");
    }

    #[tokio::test]
    async fn only_get_and_head_are_served() {
        let tree = docs_tree();

        let head = respond(tree.path(), &request(Method::HEAD, "/")).await;
        let post = respond(tree.path(), &request(Method::POST, "/")).await;
        let put = respond(tree.path(), &request(Method::PUT, "/index.html")).await;

        assert_eq!(head.status(), StatusCode::OK);
        assert_eq!(post.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(put.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn files_carry_last_modified() {
        let tree = docs_tree();

        let reply = respond(tree.path(), &request(Method::GET, "/ref/")).await;

        assert_eq!(reply.status(), StatusCode::OK);
        let stamp = reply.headers().get(LAST_MODIFIED).unwrap().to_str().unwrap();
        assert!(parse_http_date(stamp).is_some(), "bad stamp {stamp}");
    }
}
