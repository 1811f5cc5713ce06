//! Console output utilities.

use console::style;

/// Horizontal rule printed around each menu operation.
pub const RULE: &str =
    "----------------------------------------------------------------------------------------";

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print a separator line.
pub fn print_rule() {
    println!("{}", style(RULE).dim());
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     INSTAGRAM SCRAPER                                 ║
║     Export post links and download profile images     ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(handle: &str, download_dir: &str, session: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Profile:   {}", handle);
    println!("  Directory: {}", download_dir);
    println!(
        "  Session:   {}",
        if session { "logged in" } else { "anonymous" }
    );
    println!();
}
