//! Profile information printer.

use std::fmt::Write as _;

use console::style;

use crate::media::Profile;

/// Rule drawn above and below the biography.
const BIO_RULE: &str = "\t\t------------";

/// Render the labelled profile fields followed by the indented biography.
pub fn format_profile(profile: &Profile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "        Username:  {}", profile.handle);
    let _ = writeln!(out, "       Full Name:  {}", profile.display_name);
    let _ = writeln!(out, " Private profile:  {}", profile.is_private);
    let _ = writeln!(out, "        Verified:  {}", profile.is_verified);
    let _ = writeln!(out, " Number of Posts:  {}", profile.post_count);
    let _ = writeln!(out, " Followers Count:  {}", profile.followers);
    let _ = writeln!(out, " Following Count:  {}", profile.following);
    let _ = writeln!(out, "             Bio: ");
    let _ = writeln!(out, "{}", BIO_RULE);
    for line in profile.biography.lines().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "\t\t{}", line);
    }
    let _ = writeln!(out, "{}", BIO_RULE);
    out
}

/// Print profile information to stdout.
pub fn print_profile_information(profile: &Profile) {
    print!("{}", format_profile(profile));
}

/// Print the avatar link.
pub fn print_avatar(profile: &Profile) {
    if profile.avatar_url.is_empty() {
        println!("No profile picture available");
    } else {
        println!("Profile picture: {}", style(&profile.avatar_url).underlined());
    }
}
