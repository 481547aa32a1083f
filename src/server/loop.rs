// Server loop module
// Accepts connections until shutdown is requested, then drains in-flight ones

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

/// Poll interval while waiting for connections to finish
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept loop; must run inside a `LocalSet`.
///
/// Returns once shutdown is requested. The listener is dropped on return,
/// so no new connections are accepted afterwards.
#[allow(clippy::ignored_unit_patterns)]
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<ShutdownSignal>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &shutdown);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.wait() => break,
        }
    }
}

/// Wait for active connections to finish, up to `grace`.
///
/// Returns the number of connections still open when the wait ended.
pub async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            return 0;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {remaining} connection(s) still open"
            ));
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::create_reusable_listener;
    use crate::store::Store;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let state = Arc::new(AppState::for_tests(Store::disconnected()));
                let listener =
                    create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let addr = listener.local_addr().unwrap();
                let counter = Arc::new(AtomicUsize::new(0));
                let shutdown = Arc::new(ShutdownSignal::new());

                let server = tokio::task::spawn_local(run_server_loop(
                    listener,
                    state,
                    Arc::clone(&counter),
                    Arc::clone(&shutdown),
                ));

                let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
                client
                    .write_all(b"GET /en/patients HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                    .await
                    .unwrap();
                let mut raw = String::new();
                client.read_to_string(&mut raw).await.unwrap();
                assert!(raw.starts_with("HTTP/1.1 307"));
                assert!(raw.to_ascii_lowercase().contains("location: /en/insurance"));

                shutdown.trigger("test");
                tokio::time::timeout(Duration::from_secs(2), server)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(drain_connections(&counter, Duration::from_secs(2)).await, 0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_shutdown_closes_idle_keep_alive_connection() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                // Default timeouts are 30 seconds, far longer than the drain below
                let state = Arc::new(AppState::for_tests(Store::disconnected()));
                let listener =
                    create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
                let addr = listener.local_addr().unwrap();
                let counter = Arc::new(AtomicUsize::new(0));
                let shutdown = Arc::new(ShutdownSignal::new());

                let server = tokio::task::spawn_local(run_server_loop(
                    listener,
                    state,
                    Arc::clone(&counter),
                    Arc::clone(&shutdown),
                ));

                let mut client = tokio::net::TcpStream::connect(addr).await.unwrap();
                client
                    .write_all(b"GET /healthz HTTP/1.1\r\nHost: localhost\r\n\r\n")
                    .await
                    .unwrap();
                let mut received = Vec::new();
                let mut buf = [0_u8; 1024];
                while !String::from_utf8_lossy(&received).contains(r#"{"status":"ok"}"#) {
                    let n = client.read(&mut buf).await.unwrap();
                    assert_ne!(n, 0, "connection closed before the response");
                    received.extend_from_slice(&buf[..n]);
                }
                assert_eq!(counter.load(Ordering::SeqCst), 1);

                shutdown.trigger("test");
                tokio::time::timeout(Duration::from_secs(2), server)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(drain_connections(&counter, Duration::from_secs(2)).await, 0);
                assert_eq!(client.read(&mut buf).await.unwrap(), 0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(1);
        assert_eq!(drain_connections(&counter, Duration::from_millis(60)).await, 1);
    }
}
