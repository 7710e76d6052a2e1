//! Text input widget with cursor and keyboard handling

use macroquad::prelude::*;
use super::{theme, Rect, UiContext};

/// State for a text input field
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Blink timer for cursor
    pub blink_timer: f32,
    /// Whether the input has focus
    pub focused: bool,
}

impl TextInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            blink_timer: 0.0,
            focused: false,
        }
    }

    /// Replace the content and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Move cursor left one character (handles UTF-8)
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor = prev;
        }
    }

    /// Move cursor right one character (handles UTF-8)
    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
            self.cursor = next;
        }
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    /// Handle keyboard input while focused, returns true if text changed
    pub fn handle_input(&mut self) -> bool {
        let old_text = self.text.clone();
        self.blink_timer += get_frame_time();

        if is_key_pressed(KeyCode::Left) {
            self.move_left();
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Right) {
            self.move_right();
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Home) {
            self.cursor = 0;
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::End) {
            self.cursor = self.text.len();
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
            self.blink_timer = 0.0;
        }
        if is_key_pressed(KeyCode::Delete) {
            self.delete();
            self.blink_timer = 0.0;
        }

        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' {
                self.insert_char(ch);
                self.blink_timer = 0.0;
            }
        }

        self.text != old_text
    }
}

const INPUT_BG: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const INPUT_BORDER_IDLE: Color = Color::new(0.3, 0.3, 0.35, 1.0);
const INPUT_CURSOR: Color = Color::new(0.9, 0.9, 0.95, 1.0);

/// Draw a text input field, handle focus and keyboard input.
/// Returns true if the text changed this frame.
pub fn draw_text_input(ctx: &mut UiContext, rect: Rect, state: &mut TextInputState) -> bool {
    // Click focuses; click elsewhere blurs
    if ctx.mouse.left_pressed {
        state.focused = ctx.mouse.inside(&rect);
        if state.focused {
            state.cursor = state.text.len();
            state.blink_timer = 0.0;
        }
    }

    let border = if state.focused {
        theme::ACCENT_COLOR
    } else {
        INPUT_BORDER_IDLE
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, INPUT_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

    let changed = if state.focused { state.handle_input() } else { false };

    let font_size = theme::FONT_SIZE_CONTENT;
    let padding = 6.0;
    let text_x = rect.x + padding;
    let text_y = (rect.y + (rect.h + font_size * 0.7) / 2.0).round();
    draw_text(&state.text, text_x, text_y, font_size, theme::TEXT_COLOR);

    if state.focused && (state.blink_timer % 1.0) < 0.5 {
        let before = &state.text[..state.cursor];
        let cursor_x = text_x + measure_text(before, None, font_size as u16, 1.0).width;
        draw_line(cursor_x, rect.y + 4.0, cursor_x, rect.bottom() - 4.0, 1.5, INPUT_CURSOR);
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = TextInputState::new("ab");
        state.insert_char('c');
        assert_eq!(state.text, "abc");
        assert_eq!(state.cursor, 3);

        state.backspace();
        assert_eq!(state.text, "ab");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_cursor_utf8_boundaries() {
        let mut state = TextInputState::new("1m²");
        assert_eq!(state.cursor, 4); // ² is two bytes

        state.move_left();
        assert_eq!(state.cursor, 2);
        state.move_left();
        assert_eq!(state.cursor, 1);
        state.move_right();
        assert_eq!(state.cursor, 2);

        state.delete();
        assert_eq!(state.text, "1m");
    }

    #[test]
    fn test_set_text_moves_cursor() {
        let mut state = TextInputState::new("");
        state.set_text("50");
        assert_eq!(state.cursor, 2);
        state.clear();
        assert_eq!(state.cursor, 0);
        assert!(state.text.is_empty());
    }
}
