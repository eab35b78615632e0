//! Test helpers for config server integration tests.
//!
//! - Starting a server over a throwaway directory tree
//! - Logging in the way the bootstrap page does
//! - Issuing cookie-carrying requests

use config_core::COOKIE_NAME;
use config_core::paths::{AppPaths, AssetPaths};
use config_core::server::{ConfigServerHandle, ServerOptions, start_config_server};

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, Response, StatusCode};
use tempfile::TempDir;

/// A running server plus the directory tree it owns.
pub struct TestServer {
    pub handle: ConfigServerHandle,
    pub client: Client,
    pub config_dir: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.handle.base_url())
    }

    pub fn token(&self) -> String {
        self.handle.session_token().as_str().to_string()
    }

    /// POST the token like the bootstrap form does.
    pub async fn login(&self, page: &str, token: &str) -> Response {
        self.client
            .post(self.url(&format!("/login/{page}")))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(format!("token={token}"))
            .send()
            .await
            .expect("Login request failed")
    }

    /// Log in with the real token and return the `name=value` cookie pair.
    pub async fn session_cookie(&self) -> String {
        let response = self.login("options", &self.token()).await;
        assert_eq!(response.status(), StatusCode::FOUND, "Login should redirect");

        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .expect("Login should set a cookie")
            .to_str()
            .expect("Cookie should be ASCII");
        let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
        assert!(pair.starts_with(&format!("{COOKIE_NAME}=")));
        pair
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.expect("GET request failed")
    }

    pub async fn post(&self, path: &str, cookie: &str, body: impl Into<reqwest::Body>) -> Response {
        self.client
            .post(self.url(path))
            .header(COOKIE, cookie)
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Test helper: start a server with the default idle timeout.
pub async fn start_test_server() -> TestServer {
    start_test_server_with_timeout(config_core::SERVER_TIMEOUT).await
}

/// Test helper: start a server that goes idle after `idle_timeout`.
pub async fn start_test_server_with_timeout(idle_timeout: Duration) -> TestServer {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = dir.path().join("config");
    let app_dir = dir.path().join("app");
    std::fs::create_dir_all(&app_dir).expect("Failed to create app dir");
    std::fs::write(app_dir.join("options.html"), "<h1>options</h1>").expect("Failed to write page");

    let options = ServerOptions::new(
        AppPaths::new(&config_dir, dir.path().join("local")),
        AssetPaths::beside(&app_dir),
    )
    .with_idle_timeout(idle_timeout);

    let handle = start_config_server(options)
        .await
        .expect("Failed to start config server");

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client");

    TestServer {
        handle,
        client,
        config_dir,
        _dir: dir,
    }
}
