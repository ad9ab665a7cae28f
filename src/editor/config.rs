//! Editor configuration.

use crate::buffer::DEFAULT_TAB_STOP;
use crate::render::Palette;
use std::time::Duration;

/// Configuration for the [`Editor`](super::Editor).
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Columns per tab stop.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: u8,
    /// How long one input poll waits.
    pub poll_timeout: Duration,
    /// How long a status message stays on the message bar.
    pub message_timeout: Duration,
    /// Highlight colors.
    pub palette: Palette,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: 3,
            poll_timeout: Duration::from_millis(50),
            message_timeout: Duration::from_secs(5),
            palette: Palette::default(),
        }
    }
}

impl EditorConfig {
    /// Set the tab stop. Zero is treated as one.
    #[must_use]
    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop.max(1);
        self
    }

    /// Set the number of confirming Ctrl-Q presses.
    #[must_use]
    pub const fn with_quit_times(mut self, quit_times: u8) -> Self {
        self.quit_times = quit_times;
        self
    }

    /// Set the input poll timeout.
    #[must_use]
    pub const fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Set how long status messages stay visible.
    #[must_use]
    pub const fn with_message_timeout(mut self, message_timeout: Duration) -> Self {
        self.message_timeout = message_timeout;
        self
    }

    /// Set the highlight palette.
    #[must_use]
    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_stop, 8);
        assert_eq!(config.quit_times, 3);
        assert_eq!(config.poll_timeout, Duration::from_millis(50));
        assert_eq!(config.message_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builders() {
        let config = EditorConfig::default().with_tab_stop(0).with_quit_times(1);
        assert_eq!(config.tab_stop, 1);
        assert_eq!(config.quit_times, 1);
    }
}
