//! Pagination controls bound to a [`ListView`] and the fetched total.

use ratatui::text::{Line, Span};

use artesano_core::ListView;

use crate::theme;

/// Which pagination controls can be used right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub prev: bool,
    pub next: bool,
}

impl PagerState {
    /// Both controls are off while a fetch for the resource is in flight.
    pub fn new(view: &ListView, total: u64, loading: bool) -> Self {
        Self {
            prev: !loading && view.can_prev(),
            next: !loading && view.can_next(total),
        }
    }
}

pub fn render_pager(view: &ListView, total: u64, loading: bool) -> Line<'static> {
    let state = PagerState::new(view, total, loading);
    let control = |enabled: bool, text: &'static str| {
        if enabled {
            Span::styled(text, theme::key_hint_key())
        } else {
            Span::styled(text, theme::disabled())
        }
    };

    let pages = view.last_page(total) + 1;
    Line::from(vec![
        Span::raw("  "),
        control(state.prev, "◀ prev (h)"),
        Span::styled(
            format!("   page {} of {pages}  ·  {total} total   ", view.current_page() + 1),
            theme::table_row(),
        ),
        control(state.next, "next (l) ▶"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn controls_follow_the_view() {
        let view = ListView::new(10);
        assert_eq!(
            PagerState::new(&view, 25, false),
            PagerState {
                prev: false,
                next: true
            }
        );

        let view = view.with_page(2);
        assert_eq!(
            PagerState::new(&view, 25, false),
            PagerState {
                prev: true,
                next: false
            }
        );
    }

    #[test]
    fn loading_disables_everything() {
        let view = ListView::new(10).with_page(1);
        assert_eq!(
            PagerState::new(&view, 100, true),
            PagerState {
                prev: false,
                next: false
            }
        );
    }
}
