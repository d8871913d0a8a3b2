//! Single-line text input rendering and editing for the creation modals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span};

use crate::theme;

const LABEL_WIDTH: usize = 14;

/// Field label padded to the shared column width.
pub fn label(text: &str) -> String {
    format!("  {text:<width$}", width = LABEL_WIDTH)
}

/// Render `label: value`, with a cursor when the field is active.
pub fn render_field<'a>(label: &str, value: &'a str, active: bool) -> Line<'a> {
    let style = if active {
        theme::input_active()
    } else {
        theme::input_idle()
    };
    let mut spans = vec![
        Span::styled(self::label(label), theme::key_hint()),
        Span::styled(value, style),
    ];
    if active {
        spans.push(Span::styled("▏", theme::input_active()));
    }
    Line::from(spans)
}

/// Apply a typing key to `value`. Returns `true` if the key was consumed.
pub fn edit_text(value: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            value.push(c);
            true
        }
        KeyCode::Backspace => {
            value.pop();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace() {
        let mut value = String::from("Car");
        assert!(edit_text(&mut value, key(KeyCode::Char('v'))));
        assert_eq!(value, "Carv");
        assert!(edit_text(&mut value, key(KeyCode::Backspace)));
        assert_eq!(value, "Car");
        assert!(!edit_text(&mut value, key(KeyCode::Enter)));
    }

    #[test]
    fn control_chords_are_not_text() {
        let mut value = String::new();
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!edit_text(&mut value, chord));
        assert!(value.is_empty());
    }
}
