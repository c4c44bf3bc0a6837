use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log method, path, status and latency for every request
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();

    if status >= 500 {
        tracing::error!("{} {} -> {} ({}ms)", method, path, status, elapsed_ms);
    } else {
        tracing::info!("{} {} -> {} ({}ms)", method, path, status, elapsed_ms);
    }

    response
}
