//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};
use suncare::{ExpirationStatus, domain::ColorChoice};

/// Detects whether stdout supports colored output
fn stdout_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Colours output according to the configured [`ColorChoice`].
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stdout_supports_color(),
        };
        Self { enabled }
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::Green>().to_string())
    }

    /// Color as warning (amber)
    pub fn warning(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::Orange>().to_string())
    }

    /// Color as danger (red)
    pub fn danger(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::Red>().to_string())
    }

    /// Color as info (blue)
    pub fn info(self, text: &str) -> String {
        self.paint(text, |t| t.fg::<css::LightBlue>().to_string())
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        self.paint(text, |t| t.dimmed().to_string())
    }

    /// Highlight text in the colour for an expiration status
    pub fn status(self, status: ExpirationStatus, text: &str) -> String {
        match status {
            ExpirationStatus::Good => self.success(text),
            ExpirationStatus::Reminder => self.info(text),
            ExpirationStatus::Warning => self.warning(text),
            ExpirationStatus::Critical => {
                self.paint(text, |t| t.fg::<css::Red>().bold().to_string())
            }
            ExpirationStatus::Expired => self.danger(text),
        }
    }

    fn paint(self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}
