//! Landing screen: what the app is for and where to go from here.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

const DESTINATIONS: [(ScreenId, &str); 2] = [
    (
        ScreenId::Feedstocks,
        "Raw materials in stock, and which products consume them",
    ),
    (
        ScreenId::Products,
        "Finished products, their composition and how many can be built",
    ),
];

pub struct HomeScreen {
    focused: bool,
    selected: usize,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            selected: 0,
        }
    }

    fn selected_destination(&self) -> Option<ScreenId> {
        DESTINATIONS.get(self.selected).map(|(id, _)| *id)
    }
}

impl Component for HomeScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(DESTINATIONS.len() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                return Ok(self.selected_destination().map(Action::SwitchScreen));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Artesano ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

        let intro = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Workshop catalog",
                Style::default().fg(theme::HONEY),
            )),
            Line::from(Span::styled(
                "  Keep track of feedstock stock and what your products are made of.",
                theme::table_row(),
            )),
        ];
        frame.render_widget(Paragraph::new(intro), layout[0]);

        let items: Vec<ListItem> = DESTINATIONS
            .iter()
            .map(|(id, blurb)| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("  {}  ", id.number()), theme::key_hint_key()),
                        Span::styled(id.label(), theme::title_style()),
                        Span::styled(format!("  {}", id.route()), theme::key_hint()),
                    ]),
                    Line::from(Span::styled(format!("     {blurb}"), theme::table_row())),
                    Line::from(""),
                ])
            })
            .collect();
        let list = List::new(items).highlight_style(theme::table_selected());
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, layout[1], &mut state);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("choose  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("open", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Home"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(screen: &mut HomeScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn enter_opens_the_selected_list() {
        let mut screen = HomeScreen::new();
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::SwitchScreen(ScreenId::Feedstocks))
        ));

        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.selected, 1);
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::SwitchScreen(ScreenId::Products))
        ));
    }
}
