//! Product list: search by name or feedstock, paging, composition with
//! production capacity, delete and the creation modal.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState,
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;

use artesano_core::capacity;
use artesano_core::{
    Feedstock, ListView, Modal, Product, ProductForm, ResourceState, ResourceStatus, SearchType,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::{self, form_field, pager, sub_tabs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Code,
    Name,
    Price,
    Feedstock,
    Quantity,
    Lines,
    Save,
}

impl FormField {
    const ORDER: [Self; 7] = [
        Self::Code,
        Self::Name,
        Self::Price,
        Self::Feedstock,
        Self::Quantity,
        Self::Lines,
        Self::Save,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|&f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Creation modal state beyond the form itself.
#[derive(Debug, Default)]
struct Composer {
    field: FormField,
    /// Selector contents; `None` until loaded.
    options: Option<Arc<Vec<Feedstock>>>,
    option_idx: usize,
    line_idx: usize,
    submitting: bool,
}

pub struct ProductsScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    view: ListView,
    state: ResourceState<Product>,
    table_state: TableState,
    search_input: Option<String>,
    modal: Modal<ProductForm>,
    composer: Composer,
    throbber_state: ThrobberState,
}

impl ProductsScreen {
    pub fn new(page_size: u32) -> Self {
        let mut view = ListView::new(page_size);
        view.set_search_type(SearchType::Name);
        Self {
            focused: false,
            action_tx: None,
            view,
            state: ResourceState::default(),
            table_state: TableState::default(),
            search_input: None,
            modal: Modal::Closed,
            composer: Composer::default(),
            throbber_state: ThrobberState::default(),
        }
    }

    fn loading(&self) -> bool {
        self.state.is_loading()
    }

    fn fetch(&self) -> Action {
        Action::LoadProducts(self.view.clone())
    }

    fn selected(&self) -> Option<Arc<Product>> {
        let idx = self.table_state.selected()?;
        self.state.items.get(idx).cloned()
    }

    fn toggled_search_type(&self) -> SearchType {
        match self.view.search_type() {
            Some(SearchType::Feedstock) => SearchType::Name,
            _ => SearchType::Feedstock,
        }
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

    #[allow(clippy::too_many_lines)]
    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        let composer = &mut self.composer;
        let form = self.modal.form_mut()?;
        let field = composer.field;

        match key.code {
            KeyCode::Esc => {
                self.modal.close();
                self.composer = Composer::default();
                return None;
            }
            KeyCode::Tab => composer.field = field.next(),
            KeyCode::BackTab => composer.field = field.prev(),
            _ if composer.submitting => {}
            _ => match field {
                FormField::Code | FormField::Name | FormField::Price => match key.code {
                    KeyCode::Enter | KeyCode::Down => composer.field = field.next(),
                    KeyCode::Up => composer.field = field.prev(),
                    _ => {
                        let target = match field {
                            FormField::Code => &mut form.code,
                            FormField::Name => &mut form.name,
                            _ => &mut form.unit_price,
                        };
                        form_field::edit_text(target, key);
                    }
                },
                FormField::Feedstock => {
                    let count = composer.options.as_ref().map_or(0, |o| o.len());
                    match key.code {
                        KeyCode::Left | KeyCode::Char('h') if count > 0 => {
                            composer.option_idx = (composer.option_idx + count - 1) % count;
                        }
                        KeyCode::Right | KeyCode::Char('l') if count > 0 => {
                            composer.option_idx = (composer.option_idx + 1) % count;
                        }
                        KeyCode::Enter => {
                            let option = composer
                                .options
                                .as_ref()
                                .and_then(|o| o.get(composer.option_idx));
                            if let Some(feedstock) = option {
                                form.select(feedstock);
                                composer.field = FormField::Quantity;
                            }
                        }
                        KeyCode::Down => composer.field = field.next(),
                        KeyCode::Up => composer.field = field.prev(),
                        _ => {}
                    }
                }
                FormField::Quantity => match key.code {
                    KeyCode::Enter => {
                        if let Err(e) = form.add_line() {
                            return Some(Action::Notify(Notification::error(e.to_string())));
                        }
                        composer.line_idx = form.lines.len().saturating_sub(1);
                        composer.field = FormField::Feedstock;
                    }
                    KeyCode::Down => composer.field = field.next(),
                    KeyCode::Up => composer.field = field.prev(),
                    _ => {
                        form_field::edit_text(&mut form.pending_quantity, key);
                    }
                },
                FormField::Lines => match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        composer.line_idx = (composer.line_idx + 1)
                            .min(form.lines.len().saturating_sub(1));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        composer.line_idx = composer.line_idx.saturating_sub(1);
                    }
                    KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                        form.remove_line(composer.line_idx);
                        composer.line_idx =
                            composer.line_idx.min(form.lines.len().saturating_sub(1));
                    }
                    KeyCode::Enter => composer.field = field.next(),
                    _ => {}
                },
                FormField::Save => match key.code {
                    KeyCode::Enter if form.can_submit() => {
                        if let Err(e) = form.to_request() {
                            return Some(Action::Notify(Notification::error(e.to_string())));
                        }
                        composer.submitting = true;
                        return Some(Action::SubmitProductForm {
                            form: form.clone(),
                            view: self.view.clone(),
                        });
                    }
                    KeyCode::Up => composer.field = field.prev(),
                    _ => {}
                },
            },
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
            KeyCode::Char('t') if !loading => {
                let next = self.toggled_search_type();
                self.view.set_search_type(next).then(|| self.fetch())
            }
            KeyCode::Char('c') if !loading => self.view.clear_filters().then(|| self.fetch()),
            KeyCode::Char('r') if !loading => Some(self.fetch()),
            KeyCode::Char('a') => {
                self.modal.open(ProductForm::default());
                self.composer = Composer::default();
                Some(Action::LoadFeedstockOptions)
            }
            KeyCode::Char('d') | KeyCode::Delete => self.selected().map(|p| {
                Action::RequestDeleteProduct {
                    id: p.id,
                    name: p.name.clone(),
                    view: self.view.clone(),
                }
            }),
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let editing = self.search_input.is_some();
        let layout = Layout::horizontal([Constraint::Min(10), Constraint::Length(24)]).split(area);

        let (text, style) = match &self.search_input {
            Some(input) => (format!("{input}▏"), theme::input_active()),
            None if self.view.search_term().is_empty() => {
                ("press / to search".to_owned(), theme::key_hint())
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
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)).block(block),
            layout[0],
        );

        let active = usize::from(self.view.search_type() == Some(SearchType::Feedstock));
        let by = Block::default()
            .title(" By (t) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(
                &["name", "feedstock"],
                active,
                !self.loading(),
            ))
            .block(by),
            layout[1],
        );
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(" Products ")
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
                    "  Could not load products. Press r to retry.",
                    Style::default().fg(theme::BRICK),
                ),
                ResourceStatus::Loaded => Span::styled("  No products match.", theme::key_hint()),
                ResourceStatus::Idle | ResourceStatus::Loading => Span::raw(""),
            };
            frame.render_widget(Paragraph::new(message), inner);
            return;
        }

        let header = Row::new(["Code", "Name", "Price", "Lines", "Can build"])
            .style(theme::table_header());
        let rows: Vec<Row> = self
            .state
            .items
            .iter()
            .map(|p| {
                let units = p.possible_units();
                let units_style = if units > 0 {
                    Style::default().fg(theme::MOSS)
                } else {
                    Style::default().fg(theme::BRICK)
                };
                Row::new(vec![
                    Cell::from(p.code.clone()),
                    Cell::from(p.name.clone()),
                    Cell::from(widgets::fmt_price(p.unit_price)),
                    Cell::from(p.composition.len().to_string()),
                    Cell::from(units.to_string()).style(units_style),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Composition ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(product) = self.selected() else {
            return;
        };
        let bottleneck = product.bottleneck().map(|line| line.feedstock_id);

        let mut lines = vec![
            Line::from(Span::styled(product.name.clone(), theme::title_style())),
            Line::from(vec![
                Span::styled("Can build ", theme::key_hint()),
                Span::styled(
                    product.possible_units().to_string(),
                    Style::default().fg(theme::AMBER).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" unit(s)", theme::key_hint()),
            ]),
            Line::from(""),
        ];
        for line in &product.composition {
            let limiting = bottleneck == Some(line.feedstock_id);
            let allows = capacity::line_limit(line)
                .map_or_else(|| "-".to_owned(), |l| l.floor().to_string());
            let name_style = if limiting {
                Style::default().fg(theme::CLAY).add_modifier(Modifier::BOLD)
            } else {
                theme::table_row()
            };
            lines.push(Line::from(vec![
                Span::styled(if limiting { "▸ " } else { "  " }, name_style),
                Span::styled(line.name.clone(), name_style),
                Span::styled(
                    format!(
                        "  {} / unit · {} in stock · allows {allows}",
                        widgets::fmt_decimal(line.quantity),
                        widgets::fmt_decimal(line.stock),
                    ),
                    theme::key_hint(),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_selector(&self, form: &ProductForm) -> Line<'static> {
        let active = self.composer.field == FormField::Feedstock;
        let text = match &self.composer.options {
            None => "loading feedstocks…".to_owned(),
            Some(options) if options.is_empty() => "no feedstocks registered".to_owned(),
            Some(options) => options.get(self.composer.option_idx).map_or_else(
                String::new,
                |f| {
                    format!(
                        "◀ {} ({} {}) ▶  {}/{}",
                        f.name,
                        widgets::fmt_decimal(f.stock),
                        f.unit_of_measure,
                        self.composer.option_idx + 1,
                        options.len()
                    )
                },
            ),
        };
        let picked = form
            .selected
            .as_ref()
            .map(|(_, name)| format!("  picked: {name}"))
            .unwrap_or_default();
        let style = if active {
            theme::input_active()
        } else {
            theme::input_idle()
        };
        Line::from(vec![
            Span::styled(form_field::label("Feedstock"), theme::key_hint()),
            Span::styled(text, style),
            Span::styled(picked, Style::default().fg(theme::SAGE)),
        ])
    }

    fn render_modal(&self, frame: &mut Frame, area: Rect, form: &ProductForm) {
        let modal_area = widgets::centered_rect(72, 20, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" New product ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let field = self.composer.field;
        let mut lines = vec![
            Line::from(""),
            form_field::render_field("Code", &form.code, field == FormField::Code),
            form_field::render_field("Name", &form.name, field == FormField::Name),
            form_field::render_field("Unit price", &form.unit_price, field == FormField::Price),
            Line::from(""),
            self.render_selector(form),
            form_field::render_field(
                "Quantity",
                &form.pending_quantity,
                field == FormField::Quantity,
            ),
            Line::from(""),
            Line::from(Span::styled(
                "  Composition",
                if field == FormField::Lines {
                    theme::title_style()
                } else {
                    theme::key_hint()
                },
            )),
        ];
        if form.lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "    add at least one feedstock",
                theme::key_hint(),
            )));
        }
        for (i, draft) in form.lines.iter().enumerate() {
            let style = if field == FormField::Lines && i == self.composer.line_idx {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            lines.push(Line::from(Span::styled(
                format!("    {} × {}", draft.name, draft.quantity),
                style,
            )));
        }
        lines.push(Line::from(""));

        let save_style = match (form.can_submit(), field == FormField::Save) {
            (false, _) => theme::disabled(),
            (true, true) => theme::table_selected(),
            (true, false) => theme::key_hint_key(),
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled("[ Save ]", save_style),
        ]));

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), layout[0]);

        if self.composer.submitting {
            let throbber = Throbber::default()
                .label(" saving…")
                .style(theme::key_hint())
                .throbber_style(Style::default().fg(theme::AMBER));
            frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
        } else {
            let hints = Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("←/→ ", theme::key_hint_key()),
                Span::styled("pick  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("select/add  ", theme::key_hint()),
                Span::styled("x ", theme::key_hint_key()),
                Span::styled("remove line  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), layout[1]);
        }
    }
}

impl Component for ProductsScreen {
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
            Action::ProductsUpdated(state) => {
                self.state = state.clone();
                let selected =
                    widgets::clamp_selection(self.table_state.selected(), self.state.items.len());
                self.table_state.select(selected);
            }
            Action::FeedstockOptionsLoaded(options) if self.modal.is_open() => {
                self.composer.options = Some(Arc::clone(options));
                self.composer.option_idx = 0;
                if options.is_empty() {
                    return Ok(Some(Action::Notify(Notification::info(
                        "Register a feedstock before composing products",
                    ))));
                }
            }
            Action::ProductCreated(view) => {
                self.view = view.clone();
                self.modal.close();
                self.composer = Composer::default();
                self.table_state.select(Some(0));
            }
            Action::ProductFormFailed(message) => {
                self.composer.submitting = false;
                return Ok(Some(Action::Notify(Notification::error(message.clone()))));
            }
            Action::Tick if self.loading() || self.composer.submitting => {
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

        let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
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
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("search by  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("clear  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete", theme::key_hint()),
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
        if focused && self.state.status == ResourceStatus::Idle {
            if let Some(tx) = &self.action_tx {
                let _ = tx.send(self.fetch());
            }
        }
    }

    fn id(&self) -> &'static str {
        "Products"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artesano_core::{CompositionLine, EntityId};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn oak() -> Feedstock {
        Feedstock {
            id: EntityId::new(1),
            code: "CARV-01".into(),
            name: "Carvalho".into(),
            stock: Decimal::from(10),
            unit_of_measure: "M3".into(),
            products: vec![],
        }
    }

    fn table() -> Arc<Product> {
        Arc::new(Product {
            id: EntityId::new(4),
            code: "MESA-01".into(),
            name: "Mesa".into(),
            unit_price: Decimal::from(1500),
            composition: vec![CompositionLine {
                feedstock_id: EntityId::new(1),
                feedstock_code: "CARV-01".into(),
                name: "Carvalho".into(),
                stock: Decimal::from(10),
                quantity: Decimal::from(2),
            }],
        })
    }

    fn screen_with(total: u64, status: ResourceStatus) -> ProductsScreen {
        let mut screen = ProductsScreen::new(5);
        screen
            .update(&Action::ProductsUpdated(ResourceState {
                items: Arc::new(vec![table()]),
                total,
                page: 0,
                size: 5,
                status,
            }))
            .unwrap_or_else(|e| panic!("{e}"));
        screen
    }

    fn press(screen: &mut ProductsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    fn type_text(screen: &mut ProductsScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    #[test]
    fn search_type_toggle_resets_page() {
        let mut screen = screen_with(20, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.view.current_page(), 1);

        match press(&mut screen, KeyCode::Char('t')) {
            Some(Action::LoadProducts(view)) => {
                assert_eq!(view.search_type(), Some(SearchType::Feedstock));
                assert_eq!(view.current_page(), 0);
            }
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn toggle_is_disabled_while_loading() {
        let mut screen = screen_with(20, ResourceStatus::Loading);
        assert!(press(&mut screen, KeyCode::Char('t')).is_none());
        assert_eq!(screen.view.search_type(), Some(SearchType::Name));
    }

    #[test]
    fn delete_requests_confirmation_for_selected() {
        let mut screen = screen_with(1, ResourceStatus::Loaded);
        match press(&mut screen, KeyCode::Char('d')) {
            Some(Action::RequestDeleteProduct { id, name, .. }) => {
                assert_eq!(id, EntityId::new(4));
                assert_eq!(name, "Mesa");
            }
            other => panic!("expected a delete request, got {other:?}"),
        }
    }

    #[test]
    fn opening_the_modal_loads_options() {
        let mut screen = screen_with(1, ResourceStatus::Loaded);
        assert!(matches!(
            press(&mut screen, KeyCode::Char('a')),
            Some(Action::LoadFeedstockOptions)
        ));
        assert!(screen.captures_input());
        assert!(screen.composer.options.is_none());
    }

    #[test]
    fn save_needs_a_composition_line() {
        let mut screen = screen_with(1, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        screen
            .update(&Action::FeedstockOptionsLoaded(Arc::new(vec![oak()])))
            .unwrap_or_else(|e| panic!("{e}"));

        type_text(&mut screen, "MESA-01");
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "Mesa");
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "1500");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.composer.field, FormField::Feedstock);

        screen.composer.field = FormField::Save;
        assert!(press(&mut screen, KeyCode::Enter).is_none());

        screen.composer.field = FormField::Feedstock;
        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.composer.field, FormField::Quantity);
        type_text(&mut screen, "2");
        assert!(press(&mut screen, KeyCode::Enter).is_none());
        assert_eq!(screen.modal.form().map(|f| f.lines.len()), Some(1));

        screen.composer.field = FormField::Save;
        match press(&mut screen, KeyCode::Enter) {
            Some(Action::SubmitProductForm { form, .. }) => {
                let request = form.to_request().unwrap_or_else(|e| panic!("{e}"));
                assert_eq!(request.code, "MESA-01");
                assert_eq!(request.unit_price, Decimal::from(1500));
                assert_eq!(request.composition.len(), 1);
            }
            other => panic!("expected a submit, got {other:?}"),
        }
        assert!(screen.composer.submitting);
    }

    #[test]
    fn zero_quantity_line_is_refused() {
        let mut screen = screen_with(1, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        screen
            .update(&Action::FeedstockOptionsLoaded(Arc::new(vec![oak()])))
            .unwrap_or_else(|e| panic!("{e}"));
        screen.composer.field = FormField::Feedstock;
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "0");
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::Notify(_))
        ));
        assert_eq!(screen.modal.form().map(|f| f.lines.len()), Some(0));
    }

    #[test]
    fn created_product_closes_the_modal() {
        let mut screen = screen_with(1, ResourceStatus::Loaded);
        press(&mut screen, KeyCode::Char('a'));
        screen
            .update(&Action::ProductCreated(ListView::new(5)))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(!screen.modal.is_open());
        assert!(!screen.captures_input());
    }
}
