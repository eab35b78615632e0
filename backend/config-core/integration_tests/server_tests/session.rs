use crate::server_tests::helpers::start_test_server;

use config_core::auth::AuthState;

use reqwest::StatusCode;
use reqwest::header::{LOCATION, SET_COOKIE};
use serde_json::{Value, json};

/// **VALUE**: Verifies the full browser flow: login, redirect, then data access with the cookie.
///
/// **WHY THIS MATTERS**: This is exactly what happens when the user opens the options
/// page. If any step breaks, the settings UI shows nothing.
///
/// **BUG THIS CATCHES**: Would catch:
/// - The cookie not being accepted by the data endpoints
/// - The redirect pointing at the wrong page
/// - The auth state not being visible through the handle
#[tokio::test]
async fn given_running_server_when_browser_logs_in_then_data_endpoints_open() {
    // GIVEN: A running server
    let server = start_test_server().await;
    assert_eq!(server.handle.auth_state(), AuthState::Unauthenticated);

    // WHEN: Logging in for the options page
    let response = server.login("options", &server.token()).await;

    // THEN: Redirected to the page with a cookie
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/options.html");
    assert!(response.headers().get(SET_COOKIE).is_some());
    assert_eq!(server.handle.auth_state(), AuthState::Authenticated);

    // AND: The cookie opens /config
    let cookie = server.session_cookie().await;
    let config: Value = server
        .get("/config", Some(&cookie))
        .await
        .json()
        .await
        .expect("Config should be JSON");
    assert_eq!(config["selectedInputMethodId"], "checj");

    // AND: The landing page itself is served
    let page = server.get("/options.html", None).await;
    assert_eq!(page.status(), StatusCode::OK);
}

/// **VALUE**: Verifies a wrong token neither logs in nor opens data endpoints.
///
/// **BUG THIS CATCHES**: Would catch a rejected login still handing out a usable cookie.
#[tokio::test]
async fn given_wrong_token_when_login_then_no_access() {
    let server = start_test_server().await;

    let response = server.login("options", "not-the-token").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(server.handle.auth_state(), AuthState::Unauthenticated);

    let forbidden = server
        .get("/config", Some("mctabim_config_token=not-the-token"))
        .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}

/// **VALUE**: Verifies concurrent editors resolve to the last write.
///
/// **WHY THIS MATTERS**: Two open UI tabs can both save; the file must end up holding
/// one of them intact, not a merge.
///
/// **BUG THIS CATCHES**: Would catch the server merging posted documents into the file.
#[tokio::test]
async fn given_two_config_posts_when_get_then_last_one_wins() {
    let server = start_test_server().await;
    let cookie = server.session_cookie().await;

    let first = server
        .post("/config", &cookie, r#"{"candidateFontSize": 18, "useNotification": true}"#)
        .await;
    assert_eq!(first.json::<Value>().await.unwrap(), json!({ "return": true }));
    let second = server
        .post("/config", &cookie, r#"{"candidateFontSize": 24}"#)
        .await;
    assert_eq!(second.json::<Value>().await.unwrap(), json!({ "return": true }));

    // The file holds only the second document
    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(server.config_dir.join("config.json")).unwrap())
            .unwrap();
    assert_eq!(on_disk, json!({ "candidateFontSize": 24 }));

    // Served view: second document over defaults
    let config: Value = server.get("/config", Some(&cookie)).await.json().await.unwrap();
    assert_eq!(config["candidateFontSize"], 24);
    assert_eq!(config["useNotification"], false);
}

/// **VALUE**: Verifies the foreign language table survives a round trip over HTTP byte-for-byte.
///
/// **BUG THIS CATCHES**: Would catch encoding changes between the request body and the file.
#[tokio::test]
async fn given_utf8_table_when_posted_then_file_and_response_match() {
    let server = start_test_server().await;
    let cookie = server.session_cookie().await;
    let table = "ä|ë|ï\nñ|ß\n日本語\n";

    let ack: Value = server
        .post("/foreign_languages_symbols_table", &cookie, table)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ack["return"], true);

    let on_disk =
        std::fs::read_to_string(server.config_dir.join("foreign_languages_symbols.txt")).unwrap();
    assert_eq!(on_disk, table);

    let served = server
        .get("/foreign_languages_symbols_table", Some(&cookie))
        .await
        .text()
        .await
        .unwrap();
    assert_eq!(served, table);
}
