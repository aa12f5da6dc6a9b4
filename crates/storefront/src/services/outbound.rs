//! Timeout guard for outbound network calls.
//!
//! Every call to an external service goes through [`send_with_timeout`] so a
//! slow dependency cannot hold a request open past its deadline. The timeout
//! is enforced with `tokio::time::timeout`: when the deadline fires the
//! in-flight request future is dropped, which cancels the connection, and
//! the timer itself is consumed on every exit path - success, error, or
//! expiry - so nothing is left armed.

use std::time::Duration;

use thiserror::Error;

/// Default deadline for outbound calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from a guarded outbound call.
///
/// Timeouts are a distinct variant so callers can make their own retry
/// decision; no retry happens at this layer.
#[derive(Debug, Error)]
pub enum OutboundError {
    /// The deadline elapsed before the service responded.
    #[error("outbound call timed out after {elapsed:?}")]
    TimedOut {
        /// The deadline that was exceeded.
        elapsed: Duration,
    },

    /// The call failed for a non-timeout reason (DNS, connect, TLS, ...).
    #[error("outbound call failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl OutboundError {
    /// Whether this error is the deadline firing (as opposed to a transport
    /// failure).
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

/// Send a prepared request, failing if no response arrives within `timeout`.
///
/// # Errors
///
/// Returns [`OutboundError::TimedOut`] when the deadline elapses, or
/// [`OutboundError::Http`] for any other transport failure.
pub async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, OutboundError> {
    match tokio::time::timeout(timeout, request.send()).await {
        Ok(result) => Ok(result?),
        Err(_elapsed) => Err(OutboundError::TimedOut { elapsed: timeout }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Instant;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nok";

    /// Serve one connection, optionally stalling before the response.
    async fn one_shot_server(delay: Option<Duration>) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let _ = stream.write_all(RESPONSE).await;
        });

        addr
    }

    #[tokio::test]
    async fn test_fast_response_passes_through() {
        let addr = one_shot_server(None).await;
        let client = reqwest::Client::new();

        let response = send_with_timeout(
            client.get(format!("http://{addr}/")),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slow_response_times_out_promptly() {
        let addr = one_shot_server(Some(Duration::from_millis(500))).await;
        let client = reqwest::Client::new();

        let started = Instant::now();
        let result = send_with_timeout(
            client.get(format!("http://{addr}/")),
            Duration::from_millis(50),
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        // The deadline fires at ~50ms; well before the server's 500ms stall
        assert!(started.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_connection_failure_is_not_a_timeout() {
        let client = reqwest::Client::new();

        // Nothing listens here; the connection is refused immediately
        let result = send_with_timeout(
            client.get("http://127.0.0.1:1/"),
            Duration::from_secs(5),
        )
        .await;

        let err = result.unwrap_err();
        assert!(!err.is_timeout());
        assert!(matches!(err, OutboundError::Http(_)));
    }
}
