//! The socket loop: accept connections and feed parsed requests to the
//! router, one task per connection.

use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::header::AUTHORIZATION;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::routes::Router;

/// Bind and serve until the listener fails or the task is cancelled.
pub async fn serve(addr: SocketAddr, router: Arc<Router>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening");

    loop {
        let (stream, remote) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |request: Request<Incoming>| {
                let router = Arc::clone(&router);
                async move { handle(router, request).await }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                debug!(remote = %remote, error = %err, "Connection closed with error");
            }
        });
    }
}

async fn handle(
    router: Arc<Router>,
    request: Request<Incoming>,
) -> Result<super::response::HttpResponse, hyper::Error> {
    let (parts, body) = request.into_parts();
    let bytes = body.collect().await?.to_bytes();

    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);
    let query = parts.uri.query().unwrap_or("");

    Ok(router
        .dispatch(&parts.method, parts.uri.path(), query, bearer, bytes)
        .await)
}
