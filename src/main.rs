//! Insta Scraper - CLI entry point.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use insta_scraper::{
    api::{HttpFetcher, InstagramApi, ProfileSource},
    cli::{confirm, prompt_count, prompt_input, render_menu, Args, MenuOption},
    config::{validate_config, validate_handle, Config},
    error::{exit_codes, Error, Result},
    export::{
        download_most_liked, download_posts, export_links, export_tagged_links, ExportOptions,
    },
    fs::ensure_dir,
    media::Profile,
    output::{
        create_spinner, loading_bar, print_avatar, print_banner, print_config_summary,
        print_error, print_export_summary, print_info, print_profile_information, print_rule,
        print_success, print_warning, BarOptions,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::NotFound(_) => ExitCode::from(exit_codes::NOT_FOUND as u8),
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Api(_) | Error::RateLimited(_) | Error::TransientFetch(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::PartialExport { .. } => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;
    ensure_dir(&config.download_directory())?;

    let api = InstagramApi::new(config.api_settings())?;
    let fetcher = HttpFetcher::new(
        config.session.user_agent.clone(),
        Duration::from_secs(config.options.request_timeout_seconds),
    )?;

    let handle = match &args.user {
        Some(user) => user.clone(),
        None => ask_handle()?,
    };
    let mut profile = open_profile(&api, &handle, &config.bar_options()).await?;

    print_config_summary(
        &profile.handle,
        &config.download_directory().display().to_string(),
        config.session.session_id.is_some(),
    );

    let options = config.export_options();

    loop {
        print!("{}", render_menu());
        let Some(line) = prompt_input("\t\t\tOption: ")? else {
            break;
        };
        let option = match line.parse::<MenuOption>() {
            Ok(option) => option,
            Err(e) => {
                tracing::debug!("{}", e);
                continue;
            }
        };

        print_rule();
        match option {
            MenuOption::Exit => {
                println!("Exiting...");
                print_rule();
                break;
            }
            MenuOption::SwitchProfile => {
                let opened = match ask_handle() {
                    Ok(handle) => open_profile(&api, &handle, &config.bar_options()).await,
                    Err(e) => Err(e),
                };
                match opened {
                    Ok(next) => profile = next,
                    // A missing profile ends the program, same as at startup
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => report_failure(&e),
                }
            }
            other => {
                if let Err(e) = run_option(other, &api, &fetcher, &profile, &options).await {
                    report_failure(&e);
                }
            }
        }
        print_rule();
    }

    Ok(())
}

/// Prompt for a handle and validate it.
fn ask_handle() -> Result<String> {
    let handle = prompt_input("\tEnter username for search: ")?
        .ok_or_else(|| Error::MissingConfig("profile handle".to_string()))?;
    validate_handle(&handle)
}

/// Fetch a profile, showing a spinner while waiting.
async fn open_profile(api: &InstagramApi, handle: &str, bar: &BarOptions) -> Result<Profile> {
    let handle = validate_handle(handle)?;

    let spinner = create_spinner(&format!("Looking up {}...", handle), bar.visible);
    let profile = api.fetch_profile(&handle).await;
    spinner.finish_and_clear();

    let profile = profile?;
    if bar.visible {
        loading_bar("\tGetting user information: ", bar).await;
    }
    tracing::debug!("Opened profile {} ({} posts)", profile.handle, profile.post_count);

    Ok(profile)
}

/// Execute one export menu option.
async fn run_option(
    option: MenuOption,
    api: &InstagramApi,
    fetcher: &HttpFetcher,
    profile: &Profile,
    options: &ExportOptions,
) -> Result<()> {
    match option {
        MenuOption::ProfileInfo => {
            print_profile_information(profile);
            let stdin = io::stdin();
            if confirm(
                &mut stdin.lock(),
                "Do you want to see the profile picture (yes/no): ",
            )? {
                print_avatar(profile);
            }
        }
        MenuOption::ExportLinks => {
            let summary = export_links(api, profile, options).await?;
            print_export_summary("Link export", &summary);
            if let Some(path) = summary.artifacts.first() {
                print_success(&format!("Links stored in file: {}", path.display()));
            }
        }
        MenuOption::DownloadPosts => {
            profile.ensure_public()?;
            let count = {
                let stdin = io::stdin();
                let mut lock = stdin.lock();
                prompt_count(&mut lock, profile.post_count)?
            };
            let Some(count) = count else {
                return Ok(());
            };
            let summary = download_posts(api, fetcher, profile, count, options).await?;
            print_export_summary("Post download", &summary);
        }
        MenuOption::DownloadMostLiked => {
            print_info("Downloading post with the most likes. Might take some time.");
            let summary = download_most_liked(api, fetcher, profile, options).await?;
            if summary.units > 0 {
                print_success("Most liked post downloaded!");
            } else if summary.failures > 0 {
                print_warning("Most liked post could not be downloaded");
            } else {
                print_info("No posts to choose from");
            }
        }
        MenuOption::ExportTagged => {
            let summary = export_tagged_links(api, profile, options).await?;
            match summary.artifacts.first() {
                Some(path) => print_success(&format!(
                    "{} tagged post links stored in file: {}",
                    summary.units,
                    path.display()
                )),
                None => print_info("No links available"),
            }
        }
        MenuOption::SwitchProfile | MenuOption::Exit => {}
    }
    Ok(())
}

/// Report a failed menu operation; the menu keeps running.
fn report_failure(err: &Error) {
    match err {
        Error::Forbidden(_) => {
            print_warning("MESSAGE: Private profile! Cannot export posts!");
        }
        Error::PartialExport { units, source } => {
            print_error(&format!(
                "Export aborted after {} item(s): {}",
                units, source
            ));
        }
        other => print_error(&other.to_string()),
    }
}
