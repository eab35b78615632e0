use crate::server_tests::helpers::{start_test_server, start_test_server_with_timeout};

use config_core::port_binder::{PORT_RANGE_END, PORT_RANGE_START};

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

/// **VALUE**: Verifies the server binds loopback on a port inside the allowed range.
///
/// **BUG THIS CATCHES**: Would catch a privileged port being drawn, or the handle
/// reporting a different port than the one listening.
#[tokio::test]
async fn given_started_server_when_inspected_then_listens_on_reported_port() {
    let server = start_test_server().await;
    let port = server.handle.port();

    assert!((PORT_RANGE_START..=PORT_RANGE_END).contains(&port));
    assert_eq!(server.handle.base_url(), format!("http://127.0.0.1:{port}"));

    let response = server.get("/keep_alive", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// **VALUE**: Verifies an untouched server stops on its own.
///
/// **WHY THIS MATTERS**: The tool is launched from the input method and nobody closes it;
/// without the idle exit it would linger for the whole login session.
///
/// **BUG THIS CATCHES**: Would catch the idle timer never being polled by the server task.
#[tokio::test]
async fn given_no_traffic_when_timeout_elapses_then_server_stops() {
    // GIVEN: A server with a short idle window
    let server = start_test_server_with_timeout(Duration::from_millis(300)).await;
    let url = server.url("/keep_alive");
    let client = server.client.clone();

    // WHEN: Nothing talks to it
    let stopped = tokio::time::timeout(Duration::from_secs(5), server.handle.wait()).await;

    // THEN: It stops cleanly and the port no longer answers
    assert!(matches!(stopped, Ok(Ok(()))), "Server should stop after idling");
    assert!(client.get(&url).send().await.is_err());
}

/// **VALUE**: Verifies keep-alive pings hold the server open past its idle window.
///
/// **BUG THIS CATCHES**: Would catch `/keep_alive` not resetting the timer.
#[tokio::test]
async fn given_keep_alive_pings_when_window_elapses_then_server_stays_up() {
    // GIVEN: A logged-in client and a 1s idle window
    let server = start_test_server_with_timeout(Duration::from_secs(1)).await;
    let cookie = server.session_cookie().await;

    // WHEN: Pinging every 300ms for well over the window
    for _ in 0..8 {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let ack: Value = server
            .get("/keep_alive", Some(&cookie))
            .await
            .json()
            .await
            .expect("Server should still answer");
        assert_eq!(ack["return"], true);
    }

    // THEN: Once the pings stop, it winds down
    let stopped = tokio::time::timeout(Duration::from_secs(5), server.handle.wait()).await;
    assert!(matches!(stopped, Ok(Ok(()))));
}

/// **VALUE**: Verifies an explicit quit stops the server without waiting for the timeout.
#[tokio::test]
async fn given_running_server_when_quit_then_wait_returns() {
    let server = start_test_server().await;

    server.handle.quit();
    let stopped = tokio::time::timeout(Duration::from_secs(5), server.handle.wait()).await;

    assert!(matches!(stopped, Ok(Ok(()))));
}
