//! Progress bar utilities.
//!
//! Drawing is left to `indicatif`; the bar, percentage and elapsed-time
//! fields are rendered by the pure functions below through custom template
//! keys so that their format is fixed regardless of terminal width.

use std::fmt;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

/// Default bar width in segments.
pub const DEFAULT_BAR_LENGTH: usize = 30;

/// Default filled-segment character.
pub const DEFAULT_FILL: char = '#';

/// Character for the unfilled part of the bar.
const EMPTY_SEGMENT: char = '-';

const BOUNDED_TEMPLATE: &str = "{prefix} [{meter}] {ratio}% {msg} Elapsed: {clock}";
const UNBOUNDED_TEMPLATE: &str = "{prefix} {pos} processed {msg} Elapsed: {clock}";

/// Appearance of a progress bar.
#[derive(Debug, Clone)]
pub struct BarOptions {
    pub length: usize,
    pub fill: char,
    pub prefix: String,
    pub suffix: String,
    /// Draw to the terminal. When false the bar still counts but renders nothing.
    pub visible: bool,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_BAR_LENGTH,
            fill: DEFAULT_FILL,
            prefix: String::new(),
            suffix: String::new(),
            visible: true,
        }
    }
}

impl BarOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Number of filled segments: `floor(length * position / total)`.
///
/// A zero total counts as complete.
pub fn filled_segments(position: u64, total: u64, length: usize) -> usize {
    if total == 0 {
        return length;
    }
    let position = position.min(total);
    ((length as u128 * position as u128) / total as u128) as usize
}

/// Render the bar body (without brackets).
pub fn render_bar(position: u64, total: u64, length: usize, fill: char) -> String {
    let filled = filled_segments(position, total, length);
    let mut bar = String::with_capacity(length);
    bar.extend(std::iter::repeat(fill).take(filled));
    bar.extend(std::iter::repeat(EMPTY_SEGMENT).take(length - filled));
    bar
}

/// Percentage with one decimal place.
pub fn format_percent(position: u64, total: u64) -> String {
    if total == 0 {
        return "100.0".to_string();
    }
    let ratio = position.min(total) as f64 / total as f64;
    format!("{:.1}", ratio * 100.0)
}

/// Elapsed time as `MM:SS`. Minutes are not wrapped at an hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render a whole progress line the way the terminal shows it.
///
/// Expands the same template `indicatif` draws, with each custom key
/// filled in by the function that backs it.
pub fn render_line(
    position: u64,
    total: Option<u64>,
    elapsed: Duration,
    options: &BarOptions,
) -> String {
    let line = template_for(total)
        .replace("{prefix}", &options.prefix)
        .replace("{msg}", &options.suffix)
        .replace("{clock}", &format_elapsed(elapsed))
        .replace("{pos}", &position.to_string());

    match total {
        Some(total) => line
            .replace(
                "{meter}",
                &render_bar(position, total, options.length, options.fill),
            )
            .replace("{ratio}", &format_percent(position, total)),
        None => line,
    }
}

fn template_for(total: Option<u64>) -> &'static str {
    if total.is_some() {
        BOUNDED_TEMPLATE
    } else {
        UNBOUNDED_TEMPLATE
    }
}

fn build_style(total: Option<u64>, options: &BarOptions) -> ProgressStyle {
    let template = template_for(total);
    let length = options.length;
    let fill = options.fill;

    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key(
            "meter",
            move |state: &ProgressState, w: &mut dyn fmt::Write| {
                let total = state.len().unwrap_or(0);
                let _ = w.write_str(&render_bar(state.pos(), total, length, fill));
            },
        )
        .with_key("ratio", |state: &ProgressState, w: &mut dyn fmt::Write| {
            let total = state.len().unwrap_or(0);
            let _ = w.write_str(&format_percent(state.pos(), total));
        })
        .with_key("clock", |state: &ProgressState, w: &mut dyn fmt::Write| {
            let _ = w.write_str(&format_elapsed(state.elapsed()));
        })
}

/// Single-line, self-overwriting progress display.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter for `total` items, or an open-ended counter when the
    /// total is unknown.
    pub fn new(total: Option<u64>, options: &BarOptions) -> Self {
        let target = if options.visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        let bar = ProgressBar::with_draw_target(total, target);
        bar.set_style(build_style(total, options));
        bar.set_prefix(options.prefix.clone());
        bar.set_message(options.suffix.clone());

        Self { bar }
    }

    /// Record one consumed item.
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Items consumed so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Leave the final line on screen; later output starts on a new line.
    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }

    /// Run `f` with the bar cleared, then redraw it. Used for log lines
    /// emitted while the bar is on screen.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Decorate an iterator: items pass through unchanged while the bar advances.
    pub fn wrap_iter<I: Iterator>(self, inner: I) -> Tracked<I> {
        Tracked {
            inner,
            reporter: self,
        }
    }
}

/// Iterator adapter produced by [`ProgressReporter::wrap_iter`] and [`track`].
pub struct Tracked<I> {
    inner: I,
    reporter: ProgressReporter,
}

impl<I: Iterator> Iterator for Tracked<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(item) => {
                self.reporter.inc();
                Some(item)
            }
            None => {
                self.reporter.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Wrap any iterable in a progress bar. Without an explicit total the exact
/// size hint of the iterator is used, if it has one.
pub fn track<I: IntoIterator>(
    iterable: I,
    total: Option<u64>,
    options: &BarOptions,
) -> Tracked<I::IntoIter> {
    let inner = iterable.into_iter();
    let total = total.or_else(|| match inner.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(lower as u64),
        _ => None,
    });
    ProgressReporter::new(total, options).wrap_iter(inner)
}

/// Decorative loading bar shown after a profile lookup.
pub async fn loading_bar(prefix: &str, options: &BarOptions) {
    let options = options
        .clone()
        .with_prefix(prefix)
        .with_suffix("Completed");
    for _ in track(0..100, None, &options) {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    let spinner = if visible {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
