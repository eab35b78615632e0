//! Browser bootstrap for the session cookie.
//!
//! The token is handed to the browser through a local HTML file holding an
//! auto-submitting form, so it travels in a POST body and never shows up in
//! the address bar, browser history, or a `Referer` header.

use crate::CONFIG_SERVER_BASE_URL;
use crate::error::launch::LaunchError;

use common::{ErrorLocation, SessionToken};

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::info;

/// The UI page the browser lands on after login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchPage {
    #[default]
    Options,
    Help,
}

impl LaunchPage {
    /// `help` opens the help page; anything else, or nothing, opens options.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("help") => LaunchPage::Help,
            _ => LaunchPage::Options,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LaunchPage::Options => "options",
            LaunchPage::Help => "help",
        }
    }
}

impl fmt::Display for LaunchPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render the auto-submitting login form for `page` on `port`.
pub fn render_bootstrap_page(port: u16, page: LaunchPage, token: &SessionToken) -> String {
    format!(
        r#"<html>
    <form id="auth" action="{CONFIG_SERVER_BASE_URL}:{port}/login/{page}" method="POST">
        <input type="hidden" name="token" value="{token}">
    </form>
    <script type="text/javascript">
        document.getElementById("auth").submit();
    </script>
</html>
"#,
        page = page.name(),
        token = token.as_str(),
    )
}

/// Writes bootstrap pages into the local data directory and opens them.
#[derive(Debug, Clone)]
pub struct LaunchBridge {
    local_data_dir: PathBuf,
}

impl LaunchBridge {
    pub fn new(local_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            local_data_dir: local_data_dir.into(),
        }
    }

    /// Path of the bootstrap page for `page`; one file per page name.
    pub fn bootstrap_path(&self, page: LaunchPage) -> PathBuf {
        self.local_data_dir.join(format!("launch_{}.html", page.name()))
    }

    /// Write the bootstrap page, replacing any earlier one for the same page.
    ///
    /// # Errors
    /// Returns [`LaunchError::Write`] if the directory or file cannot be written.
    pub fn write_bootstrap_page(
        &self,
        port: u16,
        page: LaunchPage,
        token: &SessionToken,
    ) -> Result<PathBuf, LaunchError> {
        std::fs::create_dir_all(&self.local_data_dir).map_err(|e| LaunchError::Write {
            path: self.local_data_dir.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        let path = self.bootstrap_path(page);
        std::fs::write(&path, render_bootstrap_page(port, page, token)).map_err(|e| {
            LaunchError::Write {
                path: path.clone(),
                location: ErrorLocation::from(Location::caller()),
                source: e,
            }
        })?;

        Ok(path)
    }

    /// Write the bootstrap page and open it with the default browser.
    ///
    /// The file is left on disk afterwards.
    pub fn launch(
        &self,
        port: u16,
        page: LaunchPage,
        token: &SessionToken,
    ) -> Result<PathBuf, LaunchError> {
        let path = self.write_bootstrap_page(port, page, token)?;
        open_in_browser(&path)?;

        info!("Opened {} page via {}", page, path.display());
        Ok(path)
    }
}

#[track_caller]
fn open_in_browser(path: &Path) -> Result<(), LaunchError> {
    let location = ErrorLocation::from(Location::caller());

    open::that(path).map_err(|e| LaunchError::Open {
        path: path.to_path_buf(),
        location,
        source: e,
    })
}
