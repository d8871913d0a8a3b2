//! Feedstock list: search, paging, usage detail, guarded delete and the
//! creation modal.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use artesano_core::{Feedstock, FeedstockForm, ListView, Modal, ResourceState, ResourceStatus};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, form_field, pager};

/// Input focus inside the creation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Code,
    Name,
    Stock,
    Unit,
}

impl FormField {
    const ORDER: [Self; 4] = [Self::Code, Self::Name, Self::Stock, Self::Unit];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct FeedstocksScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    view: ListView,
    state: ResourceState<Feedstock>,
    table_state: TableState,
    /// Search box contents while it is being edited.
    search_input: Option<String>,
    modal: Modal<FeedstockForm>,
    field: FormField,
    submitting: bool,
    throbber_state: ThrobberState,
}

impl FeedstocksScreen {
    pub fn new(page_size: u32) -> Self {
        Self {
            focused: false,
            action_tx: None,
            view: ListView::new(page_size),
            state: ResourceState::default(),
            table_state: TableState::default(),
            search_input: None,
            modal: Modal::Closed,
            field: FormField::default(),
            submitting: false,
            throbber_state: ThrobberState::default(),
        }
    }

    fn loading(&self) -> bool {
        self.state.is_loading()
    }

    fn fetch(&self) -> Action {
        Action::LoadFeedstocks(self.view.clone())
    }

    fn selected(&self) -> Option<Arc<Feedstock>> {
        let idx = self.table_state.selected()?;
        self.state.items.get(idx).cloned()
    }

    // ── Key handling by mode ─────────────────────────────────────────

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        let loading = self.loading();
        let input = self.search_input.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.search_input = None;
                None
            }
            KeyCode::Enter if !loading => {
                let term = std::mem::take(input);
                self.search_input = None;
                self.view.set_search_term(term).then(|| self.fetch())
            }
            _ if !loading => {
                form_field::edit_text(input, key);
                None
            }
            _ => None,
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        let field = self.field;
        let submitting = self.submitting;
        let form = self.modal.form_mut()?;

        match key.code {
            KeyCode::Esc => {
                self.modal.close();
                self.submitting = false;
            }
            KeyCode::Tab | KeyCode::Down => self.field = field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = field.prev(),
            KeyCode::Enter if !submitting => {
                if let Err(e) = form.to_request() {
                    return Some(Action::Notify(Notification::error(e.to_string())));
                }
                self.submitting = true;
                return Some(Action::SubmitFeedstockForm {
                    form: form.clone(),
                    view: self.view.clone(),
                });
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if field == FormField::Unit => {
                form.unit = form.unit.next();
            }
            _ if !submitting => {
                let target = match field {
                    FormField::Code => &mut form.code,
                    FormField::Name => &mut form.name,
                    FormField::Stock => &mut form.stock,
                    FormField::Unit => return None,
                };
                form_field::edit_text(target, key);
            }
            _ => {}
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let loading = self.loading();
        let total = self.state.total;
        let len = self.state.items.len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = widgets::step_selection(self.table_state.selected(), len, 1);
                self.table_state.select(next);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let next = widgets::step_selection(self.table_state.selected(), len, -1);
                self.table_state.select(next);
                None
            }
            KeyCode::Char('l') | KeyCode::Right if !loading => {
                self.view.next_page(total).then(|| self.fetch())
            }
            KeyCode::Char('h') | KeyCode::Left if !loading => {
                self.view.prev_page().then(|| self.fetch())
            }
            KeyCode::Char('/') if !loading => {
                self.search_input = Some(self.view.search_term().to_owned());
                None
            }
            KeyCode::Char('c') if !loading => self.view.clear_filters().then(|| self.fetch()),
            KeyCode::Char('r') if !loading => Some(self.fetch()),
            KeyCode::Char('a') => {
                self.modal.open(FeedstockForm::default());
                self.field = FormField::default();
                self.submitting = false;
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.selected()
                    .map(|feedstock| Action::RequestDeleteFeedstock {
                        feedstock,
                        view: self.view.clone(),
                    })
            }
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let editing = self.search_input.is_some();
        let (text, style) = match &self.search_input {
            Some(input) => (format!("{input}▏"), theme::input_active()),
            None if self.view.search_term().is_empty() => {
                ("press / to search by name or code".to_owned(), theme::key_hint())
            }
            None => (self.view.search_term().to_owned(), theme::input_idle()),
        };
        let style = if self.loading() && editing {
            theme::disabled()
        } else {
            style
        };
        let border = if editing {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        frame.render_widget(Paragraph::new(Span::styled(text, style)).block(block), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Feedstocks ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading() {
            let throbber = Throbber::default()
                .label(" loading")
                .style(theme::key_hint())
                .throbber_style(Style::default().fg(theme::AMBER));
            let spot = Rect::new(inner.right().saturating_sub(12), area.y, 11, 1);
            frame.render_stateful_widget(throbber, spot, &mut self.throbber_state.clone());
        }

        if self.state.items.is_empty() {
            let message = match self.state.status {
                ResourceStatus::Errored => Span::styled(
                    "  Could not load feedstocks. Press r to retry.",
                    Style::default().fg(theme::BRICK),
                ),
                ResourceStatus::Loaded => {
                    Span::styled("  No feedstocks match.", theme::key_hint())
                }
                ResourceStatus::Idle | ResourceStatus::Loading => Span::raw(""),
            };
            frame.render_widget(Paragraph::new(message), inner);
            return;
        }

        let header = Row::new(["Code", "Name", "Stock", "Unit", "Used by"])
            .style(theme::table_header());
        let rows: Vec<Row> = self
            .state
            .items
            .iter()
            .map(|f| {
                let used_by = if f.is_in_use() {
                    Cell::from(format!("🔒 {}", f.dependent_count()))
                        .style(Style::default().fg(theme::HONEY))
                } else {
                    Cell::from("-")
                };
                Row::new(vec![
                    Cell::from(f.code.clone()),
                    Cell::from(f.name.clone()),
                    Cell::from(widgets::fmt_decimal(f.stock)),
                    Cell::from(f.unit_of_measure.clone()),
                    used_by,
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(8),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Used by ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(feedstock) = self.selected() else {
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(feedstock.name.clone(), theme::title_style())),
            Line::from(Span::styled(
                format!(
                    "{} · {} {}",
                    feedstock.code,
                    widgets::fmt_decimal(feedstock.stock),
                    feedstock.unit_of_measure
                ),
                theme::key_hint(),
            )),
            Line::from(""),
        ];
        if feedstock.products.is_empty() {
            lines.push(Line::from(Span::styled(
                "No product uses it; it can be deleted.",
                Style::default().fg(theme::MOSS),
            )));
        } else {
            for usage in &feedstock.products {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<10}", usage.product_code), theme::key_hint()),
                    Span::styled(usage.name.clone(), theme::table_row()),
                    Span::styled(
                        format!("  ×{}", widgets::fmt_decimal(usage.quantity)),
                        Style::default().fg(theme::SAGE),
                    ),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Locked: remove it from these products first.",
                Style::default().fg(theme::HONEY),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_modal(&self, frame: &mut Frame, area: Rect, form: &FeedstockForm) {
        let modal_area = widgets::centered_rect(56, 11, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" New feedstock ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let unit = format!("◀ {} ▶", form.unit.as_str());
        let lines = vec![
            Line::from(""),
            form_field::render_field("Code", &form.code, self.field == FormField::Code),
            form_field::render_field("Name", &form.name, self.field == FormField::Name),
            form_field::render_field("Stock", &form.stock, self.field == FormField::Stock),
            form_field::render_field("Unit", &unit, self.field == FormField::Unit),
            Line::from(""),
        ];
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), layout[0]);

        if self.submitting {
            let throbber = Throbber::default()
                .label(" saving…")
                .style(theme::key_hint())
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
        } else {
            let hints = Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), layout[1]);
        }
    }
}

impl Component for FeedstocksScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = if self.modal.is_open() {
            self.handle_modal_key(key)
        } else if self.search_input.is_some() {
            self.handle_search_key(key)
        } else {
            self.handle_list_key(key)
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::FeedstocksUpdated(state) => {
                self.state = state.clone();
                let selected =
                    widgets::clamp_selection(self.table_state.selected(), self.state.items.len());
                self.table_state.select(selected);
            }
            Action::FeedstockDeleted(view) => {
                self.view = view.clone();
            }
            Action::FeedstockCreated(view) => {
                self.view = view.clone();
                self.modal.close();
                self.submitting = false;
                self.table_state.select(Some(0));
            }
            Action::FeedstockFormFailed(message) => {
                self.submitting = false;
                return Ok(Some(Action::Notify(Notification::error(message.clone()))));
            }
            Action::Tick if self.loading() || self.submitting => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_search(frame, layout[0]);

        let body = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(layout[1]);
        self.render_table(frame, body[0]);
        self.render_detail(frame, body[1]);

        frame.render_widget(
            Paragraph::new(pager::render_pager(
                &self.view,
                self.state.total,
                self.loading(),
            )),
            layout[2],
        );

        let hints = Line::from(vec![
            Span::styled("  / ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(form) = self.modal.form() {
            self.render_modal(frame, area, form);
        }
    }

    fn captures_input(&self) -> bool {
        self.modal.is_open() || self.search_input.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        // First visit loads the first page
        if focused && self.state.status == ResourceStatus::Idle {
            if let Some(tx) = &self.action_tx {
                let _ = tx.send(self.fetch());
            }
        }
    }

    fn id(&self) -> &'static str {
        "Feedstocks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artesano_core::{EntityId, ProductUsage, UnitOfMeasure};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn feedstock(id: i64, name: &str, used_by: usize) -> Arc<Feedstock> {
        Arc::new(Feedstock {
            id: EntityId::new(id),
            code: format!("F-{id}"),
            name: name.into(),
            stock: Decimal::from(10),
            unit_of_measure: "KG".into(),
            products: (0..used_by)
                .map(|i| ProductUsage {
                    product_id: EntityId::new(100 + i64::try_from(i).unwrap_or(0)),
                    product_code: format!("P-{i}"),
                    name: format!("Product {i}"),
                    unit_price: Decimal::ONE,
                    quantity: Decimal::ONE,
                })
                .collect(),
        })
    }

    fn loaded(items: Vec<Arc<Feedstock>>, total: u64, status: ResourceStatus) -> Action {
        Action::FeedstocksUpdated(ResourceState {
            items: Arc::new(items),
            total,
            page: 0,
            size: 10,
            status,
        })
    }

    fn screen_with(total: u64, status: ResourceStatus) -> FeedstocksScreen {
        let mut screen = FeedstocksScreen::new(10);
        screen
            .update(&loaded(
                vec![feedstock(1, "Carvalho", 2), feedstock(2, "Pinus", 0)],
                total,
                status,
            ))
            .unwrap_or_else(|e| panic!("{e}"));
        screen
    }

    fn press(screen: &mut FeedstocksScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    fn type_text(screen: &mut FeedstocksScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn search_submit_resets_page_and_fetches() {
        let mut screen = screen_with(40, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.view.current_page(), 1);

        press(&mut screen, KeyCode::Char('/'));
        assert!(screen.captures_input());
        type_text(&mut screen, "carv");
        match press(&mut screen, KeyCode::Enter) {
            Some(Action::LoadFeedstocks(view)) => {
                assert_eq!(view.current_page(), 0);
                assert_eq!(view.search_term(), "carv");
            }
            other => panic!("expected a fetch, got {other:?}"),
        }
        assert!(!screen.captures_input());
    }

    #[test]
    fn controls_are_disabled_while_loading() {
        let mut screen = screen_with(40, ResourceStatus::Loading);
        assert!(press(&mut screen, KeyCode::Char('l')).is_none());
        assert_eq!(screen.view.current_page(), 0);
        assert!(press(&mut screen, KeyCode::Char('/')).is_none());
        assert!(!screen.captures_input());
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut screen = screen_with(10, ResourceStatus::Loaded);
        assert!(press(&mut screen, KeyCode::Char('l')).is_none());
        assert_eq!(screen.view.current_page(), 0);
    }

    #[test]
    fn delete_targets_the_selected_row() {
        let mut screen = screen_with(2, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Down);
        match press(&mut screen, KeyCode::Char('d')) {
            Some(Action::RequestDeleteFeedstock { feedstock, .. }) => {
                assert_eq!(feedstock.name, "Pinus");
            }
            other => panic!("expected a delete request, got {other:?}"),
        }
    }

    #[test]
    fn invalid_form_is_blocked_locally() {
        let mut screen = screen_with(2, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "F-9");
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Notify(_))
        ));
        assert!(!screen.submitting);
        assert!(screen.modal.is_open());
    }

    #[test]
    fn valid_form_is_submitted_and_closed_on_success() {
        let mut screen = screen_with(2, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "F-123");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "Carvalho");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "12.5");
        press(&mut screen, KeyCode::Tab);
        press(&mut screen, KeyCode::Right);

        match press(&mut screen, KeyCode::Enter) {
            Some(Action::SubmitFeedstockForm { form, .. }) => {
                assert_eq!(form.code, "F-123");
                assert_eq!(form.name, "Carvalho");
                assert_eq!(form.stock, "12.5");
                assert_eq!(form.unit, UnitOfMeasure::M);
            }
            other => panic!("expected a submit, got {other:?}"),
        }
        assert!(screen.submitting);

        screen
            .update(&Action::FeedstockCreated(ListView::new(10)))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(!screen.modal.is_open());
    }

    #[test]
    fn failed_submit_keeps_the_form() {
        let mut screen = screen_with(2, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        type_text(&mut screen, "F-1");
        screen.submitting = true;

        let follow_up = screen
            .update(&Action::FeedstockFormFailed("code taken".into()))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(follow_up, Some(Action::Notify(_))));
        assert!(!screen.submitting);
        assert_eq!(screen.modal.form().map(|f| f.code.as_str()), Some("F-1"));
    }
}
