//! Command line for `mctabim-config`.
//!
//! Only the first argument matters. The tool runs without a console on
//! Windows, so nothing on the command line may make it exit early: there are
//! no flags, and anything unexpected falls back to the options page.

use config_core::launch::LaunchPage;

use clap::Parser;

/// Settings UI for the McTabim input method.
///
/// Starts a loopback server for the settings pages and opens them in the
/// default browser. The server exits on its own once the pages go quiet.
#[derive(Debug, Parser)]
#[command(
    name = "mctabim-config",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Page to open: `help` for the help page, anything else for options.
    #[arg(allow_hyphen_values = true)]
    pub page: Option<String>,

    /// Ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    pub fn launch_page(&self) -> LaunchPage {
        LaunchPage::from_arg(self.page.as_deref())
    }
}
