//! Interactive prompts. All stdin reading lives here.

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::export::parse_count;
use crate::output::print_warning;

/// Print `message` and read one trimmed line.
///
/// Returns `None` on end of input.
pub fn prompt_input(message: &str) -> Result<Option<String>> {
    let stdin = io::stdin();
    prompt_from(&mut stdin.lock(), message)
}

/// Prompt on an arbitrary reader (used by tests).
pub fn prompt_from<R: BufRead>(reader: &mut R, message: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut buffer = String::new();
    if reader.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// Ask for a post count until a valid one is entered.
///
/// Returns `None` if input ends before a valid count was given.
pub fn prompt_count<R: BufRead>(reader: &mut R, total: u64) -> Result<Option<usize>> {
    let message = format!(
        "How many latest posts you want to download (Total number of posts: {}): ",
        total
    );

    loop {
        let Some(line) = prompt_from(reader, &message)? else {
            return Ok(None);
        };
        match parse_count(&line, total) {
            Ok(count) => return Ok(Some(count)),
            Err(e) => print_warning(&e.to_string()),
        }
    }
}

/// Ask a yes/no question; anything but "yes"/"y" is a no.
pub fn confirm<R: BufRead>(reader: &mut R, message: &str) -> Result<bool> {
    let answer = prompt_from(reader, message)?.unwrap_or_default();
    Ok(matches!(answer.to_lowercase().as_str(), "yes" | "y"))
}
