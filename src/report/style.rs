//! Styling profiles for the console reporter
//!
//! A `Palette` is a set of named style functions held by the renderer.
//! `Palette::plain()` leaves text untouched.

use colored::Colorize;

use crate::event::TestStatus;

/// Transforms a fragment of text into its styled form
pub type Paint = fn(&str) -> String;

/// Named style functions used by the renderer
#[derive(Clone, Copy)]
pub struct Palette {
    /// Passed glyph and tally
    pub passed: Paint,
    /// Ancestor titles of a passed test
    pub passed_head: Paint,
    /// Failed glyph and tally
    pub failed: Paint,
    /// Ancestor titles of a failed test
    pub failed_head: Paint,
    /// Pending glyph, tally and title
    pub pending: Paint,
    /// Ancestor titles of a pending test
    pub pending_head: Paint,
    /// Title of a passed or failed test
    pub title: Paint,
    /// `(12ms)` suffix, whatever the status
    pub duration: Paint,
    /// Informational lines (`Found ...`, `Ran ...`)
    pub info: Paint,
}

/// How one status is drawn
#[derive(Clone, Copy)]
pub struct StatusStyle {
    /// The status glyph, unstyled
    pub glyph: &'static str,
    /// Glyph and tally color
    pub tone: Paint,
    /// Ancestor titles
    pub head: Paint,
    /// The test title
    pub title: Paint,
}

impl StatusStyle {
    /// The glyph with its color applied
    #[must_use]
    pub fn painted_glyph(&self) -> String {
        (self.tone)(self.glyph)
    }
}

impl Palette {
    /// Colored output through ANSI escapes
    #[must_use]
    pub fn ansi() -> Self {
        Self {
            passed: ansi::passed,
            passed_head: ansi::passed_head,
            failed: ansi::failed,
            failed_head: ansi::failed_head,
            pending: ansi::pending,
            pending_head: ansi::pending_head,
            title: ansi::white,
            duration: ansi::gray,
            info: ansi::white,
        }
    }

    /// Every style is the identity
    #[must_use]
    pub fn plain() -> Self {
        Self {
            passed: plain,
            passed_head: plain,
            failed: plain,
            failed_head: plain,
            pending: plain,
            pending_head: plain,
            title: plain,
            duration: plain,
            info: plain,
        }
    }

    /// Glyph and styles for a status.
    ///
    /// `TestStatus::Failed` also carries every status the engine reported
    /// that isn't passed or pending, so those render in the failed style.
    #[must_use]
    pub fn for_status(&self, status: TestStatus) -> StatusStyle {
        let glyph = status.glyph();
        match status {
            TestStatus::Passed => StatusStyle {
                glyph,
                tone: self.passed,
                head: self.passed_head,
                title: self.title,
            },
            TestStatus::Pending => StatusStyle {
                glyph,
                tone: self.pending,
                head: self.pending_head,
                title: self.pending,
            },
            TestStatus::Failed => StatusStyle {
                glyph,
                tone: self.failed,
                head: self.failed_head,
                title: self.title,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

fn plain(text: &str) -> String {
    text.to_string()
}

mod ansi {
    use super::Colorize;

    pub fn passed(text: &str) -> String {
        text.bright_green().to_string()
    }

    pub fn passed_head(text: &str) -> String {
        text.green().bold().to_string()
    }

    pub fn failed(text: &str) -> String {
        text.bright_red().to_string()
    }

    pub fn failed_head(text: &str) -> String {
        text.red().bold().to_string()
    }

    pub fn pending(text: &str) -> String {
        text.bright_yellow().to_string()
    }

    pub fn pending_head(text: &str) -> String {
        text.yellow().bold().to_string()
    }

    pub fn white(text: &str) -> String {
        text.white().to_string()
    }

    pub fn gray(text: &str) -> String {
        text.bright_black().to_string()
    }
}
