//! Frame renderer: [`Frame`] to ANSI bytes.

use super::{Frame, FrameLine, Palette, Rgb};
use crate::terminal::OutputBuffer;
use unicode_width::UnicodeWidthChar;

/// Paints frames into a reusable [`OutputBuffer`].
#[derive(Debug, Default)]
pub struct FrameRenderer {
    palette: Palette,
    output: OutputBuffer,
}

impl FrameRenderer {
    /// Create a renderer using `palette`.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            output: OutputBuffer::new(),
        }
    }

    /// Build the bytes for `frame`. The slice stays valid until the next call.
    pub fn render(&mut self, frame: &Frame) -> &[u8] {
        self.output.clear();
        self.output.cursor_hide();
        self.output.cursor_home();

        for line in &frame.lines {
            self.paint_line(line);
            self.output.clear_line();
            self.output.write_str("\r\n");
        }
        self.paint_status(frame);
        self.paint_message(frame);

        self.output.cursor_move(frame.cursor.0, frame.cursor.1);
        self.output.cursor_show();
        self.output.as_bytes()
    }

    fn paint_line(&mut self, line: &FrameLine) {
        let FrameLine::Text(runs) = line else {
            self.output.write_char('~');
            return;
        };
        let mut current: Option<Rgb> = None;
        for run in runs {
            let color = self.palette.color(run.highlight);
            for ch in run.text.chars() {
                if ch.is_control() {
                    self.paint_control(ch, current);
                    continue;
                }
                if color != current {
                    match color {
                        Some(rgb) => self.output.set_fg(rgb),
                        None => self.output.default_fg(),
                    }
                    current = color;
                }
                self.output.write_char(ch);
            }
        }
        self.output.default_fg();
    }

    /// Control characters show as `@`+code in reverse video, or `?`.
    fn paint_control(&mut self, ch: char, restore: Option<Rgb>) {
        let symbol = match u8::try_from(u32::from(ch)) {
            Ok(code @ 0..=26) => char::from(b'@' + code),
            _ => '?',
        };
        self.output.reverse_video();
        self.output.write_char(symbol);
        self.output.reset_attrs();
        if let Some(rgb) = restore {
            self.output.set_fg(rgb);
        }
    }

    fn paint_status(&mut self, frame: &Frame) {
        let columns = frame.columns;
        self.output.reverse_video();
        let (left, left_width) = clip(&frame.status_left, columns);
        self.output.write_str(left);
        let right_width = display_width(&frame.status_right);
        let mut used = left_width;
        while used < columns {
            if columns - used == right_width {
                self.output.write_str(&frame.status_right);
                used += right_width;
                break;
            }
            self.output.write_char(' ');
            used += 1;
        }
        self.output.reset_attrs();
        self.output.write_str("\r\n");
    }

    fn paint_message(&mut self, frame: &Frame) {
        self.output.clear_line();
        let (message, _) = clip(&frame.message, frame.columns);
        self.output.write_str(message);
    }
}

/// Display width of `text` in terminal columns.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest prefix of `text` fitting in `columns`, with its width.
fn clip(text: &str, columns: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > columns {
            return (&text[..idx], width);
        }
        width += w;
    }
    (text, width)
}
