// Router-level tests: requests go through `build_router` with `oneshot`,
// no socket involved.

use crate::auth::{AuthState, Session};
use crate::paths::AssetPaths;
use crate::persistence::defaults::DEFAULT_SYMBOL_TABLE;
use crate::persistence::{Config, Store};
use crate::server::{ServerContext, build_router};
use crate::{COOKIE_NAME, SERVER_TIMEOUT};

use common::SessionToken;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const TOKEN: &str = "0123456789abcdef0123456789abcdef";

struct TestServer {
    _dir: TempDir,
    ctx: Arc<ServerContext>,
    router: Router,
}

/// Context with a known token, a temp config dir and a small asset tree.
fn test_server() -> TestServer {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let app_dir = dir.path().join("install").join("node").join("input_methods").join("mctabim");
    std::fs::create_dir_all(app_dir.join("css")).unwrap();
    std::fs::create_dir_all(app_dir.join("docs")).unwrap();
    std::fs::write(app_dir.join("docs").join("guide.html"), "<h1>guide</h1>").unwrap();
    std::fs::write(app_dir.join("options.html"), "<h1>options</h1>").unwrap();
    std::fs::write(app_dir.join("notes.txt"), "not a page").unwrap();
    std::fs::write(app_dir.join("css").join("app.css"), "body {}").unwrap();
    std::fs::write(dir.path().join("install").join("version.txt"), "1.2.3").unwrap();

    let ctx = Arc::new(ServerContext::new(
        Session::new(SessionToken::new(TOKEN)),
        SERVER_TIMEOUT,
        Store::new(dir.path().join("config")),
        AssetPaths::beside(&app_dir),
        0,
    ));
    let router = build_router(ctx.clone());

    TestServer {
        _dir: dir,
        ctx,
        router,
    }
}

async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn login_request(page: &str, token: &str) -> Request<Body> {
    Request::post(format!("/login/{page}"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("token={token}")))
        .unwrap()
}

fn authed(builder: axum::http::request::Builder) -> axum::http::request::Builder {
    builder.header(COOKIE, format!("{COOKIE_NAME}={TOKEN}"))
}

/// **VALUE**: Verifies the successful login handshake.
///
/// **WHY THIS MATTERS**: This is the only way the browser obtains the session cookie.
///
/// **BUG THIS CATCHES**: Would catch a missing cookie, a wrong redirect target, or the
/// auth state not advancing.
#[tokio::test]
async fn given_correct_token_when_login_then_redirects_with_cookie() {
    // GIVEN: A fresh server
    let server = test_server();

    // WHEN: Posting the right token for the help page
    let response = send(&server.router, login_request("help", TOKEN)).await;

    // THEN: 302 to the page with the session cookie
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/help.html");
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}={TOKEN}")));
    assert_eq!(server.ctx.auth.state(), AuthState::Authenticated);
}

/// **VALUE**: Verifies a wrong token gets an empty 200 and no cookie.
///
/// **BUG THIS CATCHES**: Would catch a wrong login still issuing a cookie.
#[tokio::test]
async fn given_wrong_token_when_login_then_empty_ok_without_cookie() {
    let server = test_server();

    let response = send(&server.router, login_request("options", "guess")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(response.headers().get(LOCATION).is_none());
    assert!(body_text(response).await.is_empty());
    assert_eq!(server.ctx.auth.state(), AuthState::Unauthenticated);
}

/// **VALUE**: Verifies every data endpoint refuses requests without the cookie.
///
/// **WHY THIS MATTERS**: Any local page can reach the loopback port; the cookie is the
/// only proof the request came from the logged-in browser.
///
/// **BUG THIS CATCHES**: Would catch a data route registered outside the session layer.
#[tokio::test]
async fn given_no_cookie_when_data_endpoints_requested_then_forbidden() {
    let server = test_server();

    for uri in [
        "/config",
        "/symbol_table",
        "/foreign_languages_symbols_table",
        "/keep_alive",
    ] {
        let response = send(&server.router, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "GET {uri}");
    }

    let wrong_cookie = Request::post("/config")
        .header(COOKIE, format!("{COOKIE_NAME}=guess"))
        .body(Body::from("{}"))
        .unwrap();
    let response = send(&server.router, wrong_cookie).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(!server.ctx.store.config_path().exists());
}

/// **VALUE**: Verifies `GET /config` serves the defaults on a fresh install.
#[tokio::test]
async fn given_no_saved_config_when_get_config_then_defaults() {
    let server = test_server();

    let response = send(
        &server.router,
        authed(Request::get("/config")).body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, Config::defaults().into_value());
}

/// **VALUE**: Verifies a posted config is persisted and overlaid on defaults.
///
/// **BUG THIS CATCHES**: Would catch the saved document losing default keys on reload.
#[tokio::test]
async fn given_posted_config_when_get_config_then_persisted_keys_win() {
    let server = test_server();

    let post = authed(Request::post("/config"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"candidateFontSize": 20}"#))
        .unwrap();
    let response = send(&server.router, post).await;
    let ack: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(ack, json!({ "return": true }));

    let response = send(
        &server.router,
        authed(Request::get("/config")).body(Body::empty()).unwrap(),
    )
    .await;
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["candidateFontSize"], 20);
    assert_eq!(body["selectedInputMethodId"], "checj");
}

/// **VALUE**: Verifies a malformed config body is refused without touching the file.
///
/// **BUG THIS CATCHES**: Would catch garbage being written to `config.json`, which
/// the input method reads on its own.
#[tokio::test]
async fn given_invalid_json_when_post_config_then_false_ack_and_no_file() {
    let server = test_server();

    let post = authed(Request::post("/config"))
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&server.router, post).await;

    assert_eq!(response.status(), StatusCode::OK);
    let ack: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(ack["return"], false);
    assert!(ack["error"].as_str().unwrap().starts_with("Invalid JSON"));
    assert!(!server.ctx.store.config_path().exists());
}

/// **VALUE**: Verifies the symbol table endpoints serve defaults and store text verbatim.
///
/// **BUG THIS CATCHES**: Would catch non-ASCII text being mangled on its way to disk.
#[tokio::test]
async fn given_symbol_table_when_posted_then_served_back_verbatim() {
    let server = test_server();

    let response = send(
        &server.router,
        authed(Request::get("/symbol_table")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body_text(response).await, DEFAULT_SYMBOL_TABLE);

    let table = "「」『』\n\u{3000}\n";
    let post = authed(Request::post("/symbol_table"))
        .body(Body::from(table))
        .unwrap();
    let ack: Value = serde_json::from_str(&body_text(send(&server.router, post).await).await).unwrap();
    assert_eq!(ack, json!({ "return": true }));

    let response = send(
        &server.router,
        authed(Request::get("/symbol_table")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body_text(response).await, table);
}

/// **VALUE**: Verifies API traffic pushes the idle deadline, even when it is rejected.
///
/// **WHY THIS MATTERS**: The UI pings `/keep_alive` while open; a reset that only
/// happened on success would let a half-logged-in tab time the server out mid-use.
///
/// **BUG THIS CATCHES**: Would catch the session check running before the timer reset.
#[tokio::test(start_paused = true)]
async fn given_api_request_when_handled_then_idle_deadline_pushed() {
    // GIVEN: A server whose timer started a minute ago
    let server = test_server();
    tokio::time::advance(Duration::from_secs(60)).await;
    let stale = server.ctx.idle_timer.deadline();

    // WHEN: An unauthenticated keep-alive arrives
    let response = send(
        &server.router,
        Request::get("/keep_alive").body(Body::empty()).unwrap(),
    )
    .await;

    // THEN: Rejected, yet the deadline moved a full timeout from now
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let fresh = server.ctx.idle_timer.deadline();
    assert_eq!(fresh, tokio::time::Instant::now() + SERVER_TIMEOUT);
    assert!(fresh > stale);
}

/// **VALUE**: Verifies static pages do not count as activity.
///
/// **BUG THIS CATCHES**: Would catch the idle layer wrapping the asset routes.
#[tokio::test(start_paused = true)]
async fn given_static_request_when_handled_then_idle_deadline_unchanged() {
    let server = test_server();
    tokio::time::advance(Duration::from_secs(30)).await;
    let before = server.ctx.idle_timer.deadline();

    let response = send(
        &server.router,
        Request::get("/options.html").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(server.ctx.idle_timer.deadline(), before);
}

/// **VALUE**: Verifies public static routes serve pages, asset folders and `version.txt`.
///
/// **BUG THIS CATCHES**: Would catch the version file being looked up inside the app dir,
/// or non-page files in the app dir being exposed.
#[tokio::test]
async fn given_asset_tree_when_static_paths_requested_then_served_or_not_found() {
    let server = test_server();

    let get = |uri: &str| Request::get(uri).body(Body::empty()).unwrap();

    let page = send(&server.router, get("/options.html")).await;
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(body_text(page).await, "<h1>options</h1>");

    let css = send(&server.router, get("/css/app.css")).await;
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(body_text(css).await, "body {}");

    let version = send(&server.router, get("/version.txt")).await;
    assert_eq!(version.status(), StatusCode::OK);
    assert_eq!(body_text(version).await, "1.2.3");

    let not_page = send(&server.router, get("/notes.txt")).await;
    assert_eq!(not_page.status(), StatusCode::NOT_FOUND);

    let missing = send(&server.router, get("/help.html")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

/// **VALUE**: Verifies a login POST that is not a form is treated as a wrong token.
///
/// **BUG THIS CATCHES**: Would catch axum's 415 rejection leaking out of the login endpoint
/// instead of the empty 200 every failed login gets.
#[tokio::test]
async fn given_login_without_form_content_type_when_posted_then_empty_ok() {
    let server = test_server();

    let request = Request::post("/login/options")
        .body(Body::from(format!("token={TOKEN}")))
        .unwrap();
    let response = send(&server.router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response).await.is_empty());
    assert_eq!(server.ctx.auth.state(), AuthState::Unauthenticated);
}

/// **VALUE**: Verifies symbol tables larger than axum's default body limit are stored.
///
/// **WHY THIS MATTERS**: The UI expects an ack for every save; a bare 413 would be
/// unparseable and the user's table would be lost without notice.
///
/// **BUG THIS CATCHES**: Would catch the default 2 MB body limit coming back on API routes.
#[tokio::test]
async fn given_table_over_default_body_limit_when_posted_then_round_trips() {
    // GIVEN: A logged-in client and a table of roughly 3 MB
    let server = test_server();
    let line = "線段=﹣﹦≡｜\n";
    let table = line.repeat(3_000_000 / line.len() + 1);
    assert!(table.len() > 2 * 1024 * 1024);

    // WHEN: Posting it
    let post = authed(Request::post("/symbol_table"))
        .body(Body::from(table.clone()))
        .unwrap();
    let response = send(&server.router, post).await;

    // THEN: Acked and served back unchanged
    assert_eq!(response.status(), StatusCode::OK);
    let ack: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(ack, json!({ "return": true }));

    let response = send(
        &server.router,
        authed(Request::get("/symbol_table")).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body_text(response).await, table);
}

/// **VALUE**: Verifies pages in subdirectories are served while path escapes are refused.
///
/// **BUG THIS CATCHES**: Would catch nested help pages returning 404, or `..` segments
/// (plain or percent-encoded) reaching files outside the asset directory.
#[tokio::test]
async fn given_nested_page_paths_when_requested_then_only_plain_segments_served() {
    let server = test_server();
    let get = |uri: &str| Request::get(uri).body(Body::empty()).unwrap();

    let nested = send(&server.router, get("/docs/guide.html")).await;
    assert_eq!(nested.status(), StatusCode::OK);
    assert_eq!(body_text(nested).await, "<h1>guide</h1>");

    for uri in [
        "/docs/../options.html",
        "/%2e%2e/options.html",
        "/docs//guide.html",
        "/.hidden.html",
        "/docs/guide.txt",
    ] {
        let response = send(&server.router, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }
}
