//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Interactive Instagram profile scraper.
#[derive(Parser, Debug)]
#[command(
    name = "insta-scraper",
    version,
    about = "Export post links and download images from Instagram profiles",
    long_about = "An interactive menu to print profile information, store links to posts, \
                  download images, fetch the most liked post and list tagged posts."
)]
pub struct Args {
    /// Profile handle to open. Prompted for when omitted.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Base directory for link files and downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// `sessionid` cookie of a logged-in browser session.
    #[arg(long = "session-id", env = "INSTAGRAM_SESSION_ID")]
    pub session_id: Option<String>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "INSTAGRAM_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(session_id) = &self.session_id {
            config.session.session_id = Some(session_id.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.session.user_agent = user_agent.clone();
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = Some(dir.clone());
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
