//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Profile and export summaries

pub mod console;
pub mod profile;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_rule, print_success,
    print_warning,
};
pub use profile::{format_profile, print_avatar, print_profile_information};
pub use progress::{create_spinner, loading_bar, track, BarOptions, ProgressReporter};
pub use stats::print_export_summary;
