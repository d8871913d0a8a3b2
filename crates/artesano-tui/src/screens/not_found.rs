//! Shown when the requested route matches no screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub struct NotFoundScreen {
    route: String,
}

impl NotFoundScreen {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

impl Component for NotFoundScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Enter => Some(Action::SwitchScreen(ScreenId::Home)),
            _ => None,
        })
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" 404 ")
            .title_style(Style::default().fg(theme::BRICK))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let top = inner.height.saturating_sub(4) / 2;
        let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
        lines.extend([
            Line::from(Span::styled("Page not found", theme::title_style())),
            Line::from(Span::styled(
                format!("Nothing lives at \"{}\"", self.route),
                theme::table_row(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("back to the start page", theme::key_hint()),
            ]),
        ]);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn id(&self) -> &'static str {
        "NotFound"
    }
}
