//! Inline option switcher (e.g. the product search type).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// Render `labels` on one line with the active one bracketed.
pub fn render_sub_tabs<'a>(labels: &[&'a str], active_index: usize, enabled: bool) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", theme::key_hint()));
        }
        let span = match (i == active_index, enabled) {
            (_, false) => Span::styled(*label, theme::disabled()),
            (true, true) => Span::styled(
                format!("[{label}]"),
                theme::tab_active().add_modifier(Modifier::UNDERLINED),
            ),
            (false, true) => Span::styled(*label, theme::tab_inactive()),
        };
        spans.push(span);
    }

    Line::from(spans)
}
