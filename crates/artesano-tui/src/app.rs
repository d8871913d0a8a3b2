//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use artesano_core::{Catalog, CoreError, guard};

use crate::action::{Action, Alert, ConfirmAction, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Page sizes and the route the app was opened on.
#[derive(Debug, Clone)]
pub struct Launch {
    pub route: String,
    pub feedstock_page_size: u32,
    pub product_page_size: u32,
}

/// Top-level application state and event loop.
pub struct App {
    catalog: Catalog,
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Delete waiting for y/n.
    pending_confirm: Option<ConfirmAction>,
    /// Blocking message; must be dismissed before anything else.
    alert: Option<Alert>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
}

impl App {
    pub fn new(catalog: Catalog, launch: &Launch) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> = create_screens(
            launch.feedstock_page_size,
            launch.product_page_size,
            &launch.route,
        )
        .into_iter()
        .collect();

        Self {
            catalog,
            active_screen: ScreenId::from_route(&launch.route),
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            pending_confirm: None,
            alert: None,
            notification: None,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.catalog.start().await;

        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        {
            let catalog = self.catalog.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(catalog, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(screen = %self.active_screen, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        tui.exit();
        self.catalog.shutdown().await;
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays capture input first, then a
    /// screen that is taking text, then global keys, then the screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.alert.is_some() {
            return Ok(match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::DismissAlert),
                _ => None,
            });
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = c as u8 - b'0';
                if let Some(target) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(target)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        screen.handle_key_event(key)
    }

    /// Process a single action: update app state, run catalog calls and
    /// propagate to the screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                self.update_screen(self.active_screen, action)?;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            // Fetches
            Action::LoadFeedstocks(view) => {
                let view = view.clone();
                self.spawn(|catalog, tx| async move {
                    if let Err(e) = catalog.fetch_feedstocks(&view).await {
                        warn!(error = %e, "feedstock fetch failed");
                        let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                    }
                });
            }
            Action::LoadProducts(view) => {
                let view = view.clone();
                self.spawn(|catalog, tx| async move {
                    if let Err(e) = catalog.fetch_products(&view).await {
                        warn!(error = %e, "product fetch failed");
                        let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                    }
                });
            }
            Action::LoadFeedstockOptions => {
                self.spawn(|catalog, tx| async move {
                    match catalog.feedstock_options().await {
                        Ok(options) => {
                            let _ = tx.send(Action::FeedstockOptionsLoaded(options.into()));
                        }
                        Err(e) => {
                            warn!(error = %e, "feedstock options fetch failed");
                            let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                        }
                    }
                });
            }

            // Delete requests
            Action::RequestDeleteFeedstock { feedstock, view } => {
                let next = match guard::check_feedstock_deletable(feedstock) {
                    Err(e) => {
                        info!(feedstock = %feedstock.code, "delete blocked: feedstock in use");
                        Action::ShowAlert(Alert::blocked(e.to_string()))
                    }
                    Ok(()) => Action::ShowConfirm(ConfirmAction::DeleteFeedstock {
                        feedstock: feedstock.clone(),
                        view: view.clone(),
                    }),
                };
                self.action_tx.send(next)?;
            }
            Action::RequestDeleteProduct { id, name, view } => {
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteProduct {
                        id: *id,
                        name: name.clone(),
                        view: view.clone(),
                    }))?;
            }

            // Confirmation dialog
            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),
            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }
            Action::ConfirmNo => self.pending_confirm = None,

            // Creation forms
            Action::SubmitFeedstockForm { form, view } => {
                let (form, mut view) = (form.clone(), view.clone());
                self.spawn(|catalog, tx| async move {
                    match catalog.submit_feedstock_form(&form, &mut view).await {
                        Ok(created) => {
                            info!(code = %created.code, "feedstock created");
                            let _ = tx.send(Action::FeedstockCreated(view));
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Saved {}",
                                created.name
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, "feedstock create failed");
                            let _ = tx.send(Action::FeedstockFormFailed(feedstock_failure(&e)));
                        }
                    }
                });
            }
            Action::SubmitProductForm { form, view } => {
                let (form, mut view) = (form.clone(), view.clone());
                self.spawn(|catalog, tx| async move {
                    match catalog.submit_product_form(&form, &mut view).await {
                        Ok(created) => {
                            info!(code = %created.code, "product created");
                            let _ = tx.send(Action::ProductCreated(view));
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Saved {}",
                                created.name
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, "product create failed");
                            let _ = tx.send(Action::ProductFormFailed(format!(
                                "Could not save the product: {e}"
                            )));
                        }
                    }
                });
            }

            // Alerts and notifications
            Action::ShowAlert(alert) => self.alert = Some(alert.clone()),
            Action::DismissAlert => self.alert = None,
            Action::Notify(n) => self.notification = Some((n.clone(), Instant::now())),

            // Data and results reach every screen; each keeps its own view.
            other => {
                let ids: Vec<ScreenId> = self.screens.keys().copied().collect();
                for id in ids {
                    self.update_screen(id, other)?;
                }
            }
        }

        Ok(())
    }

    fn update_screen(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Catalog calls ─────────────────────────────────────────────

    /// Run `task` in the background with its own catalog handle and sender.
    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Catalog, mpsc::UnboundedSender<Action>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(task(self.catalog.clone(), self.action_tx.clone()));
    }

    /// Run a confirmed delete. Failures raise a blocking alert with the
    /// generic message; the underlying error only goes to the log.
    fn execute_confirm(&self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::DeleteFeedstock {
                feedstock,
                mut view,
            } => {
                self.spawn(|catalog, tx| async move {
                    match catalog.delete_feedstock_in_view(&feedstock, &mut view).await {
                        Ok(()) => {
                            let _ = tx.send(Action::FeedstockDeleted(view));
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Deleted {}",
                                feedstock.name
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, id = %feedstock.id, "feedstock delete failed");
                            let _ = tx.send(Action::ShowAlert(Alert::failed(
                                guard::DELETE_FAILED_MESSAGE,
                            )));
                        }
                    }
                });
            }
            ConfirmAction::DeleteProduct { id, name, view } => {
                self.spawn(|catalog, tx| async move {
                    match catalog.delete_product_in_view(id, &view).await {
                        Ok(()) => {
                            let _ = tx.send(Action::ProductDeleted);
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Deleted {name}"
                            ))));
                        }
                        Err(e) => {
                            warn!(error = %e, %id, "product delete failed");
                            let _ = tx.send(Action::ShowAlert(Alert::failed(
                                guard::DELETE_FAILED_MESSAGE,
                            )));
                        }
                    }
                });
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notif, _)) = &self.notification {
            render_notification(frame, area, notif);
        }
        if let Some(confirm) = &self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
        if let Some(alert) = &self.alert {
            render_alert(frame, area, alert);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("● ", Style::default().fg(theme::MOSS)),
            Span::styled(
                self.catalog.config().base_url.to_string(),
                theme::table_row(),
            ),
            Span::styled(" │ ? help  Tab switch  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Alert text for a failed feedstock create.
fn feedstock_failure(err: &CoreError) -> String {
    match err {
        CoreError::ValidationFailed { message } => message.clone(),
        _ => format!("Could not save the feedstock (the code may already exist): {err}"),
    }
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let prompt = confirm.to_string();
    let width = u16::try_from(prompt.chars().count() + 8)
        .unwrap_or(u16::MAX)
        .clamp(40, 70);
    let dialog_area = crate::widgets::centered_rect(width, 5, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::HONEY))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            format!("  {prompt}"),
            Style::default().fg(theme::LINEN),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let dialog_area = crate::widgets::centered_rect(60, 8, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(alert.title)
        .title_style(Style::default().fg(theme::CLAY))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::CLAY))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(
            alert.message.as_str(),
            Style::default().fg(theme::LINEN),
        ))
            .wrap(Wrap { trim: true }),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("ok", theme::key_hint()),
        ])),
        layout[1],
    );
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
    let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 70);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width.min(area.width), height);

    let (border_color, icon) = match notif.level {
        NotificationLevel::Success => (theme::MOSS, "✓"),
        NotificationLevel::Error => (theme::BRICK, "✗"),
        NotificationLevel::Info => (theme::AMBER, "·"),
    };

    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(notif.message.as_str(), Style::default().fg(theme::LINEN)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = crate::widgets::centered_rect(60, 22, area);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        [
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::AMBER),
            )),
            Line::from(Span::styled(
                format!("  {}", "─".repeat(title.len())),
                theme::key_hint(),
            )),
        ]
    };
    let row = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let mut text = vec![Line::from("")];
    text.extend(section("Navigation"));
    text.extend([
        row("1-3", "Jump to screen"),
        row("Tab", "Next screen"),
        row("j/k ↑/↓", "Move up/down"),
        row("h/l ←/→", "Previous / next page"),
        row("Esc", "Back / close"),
        Line::from(""),
    ]);
    text.extend(section("Lists"));
    text.extend([
        row("/", "Search (Enter to apply)"),
        row("t", "Search products by name or feedstock"),
        row("c", "Clear filters"),
        row("r", "Reload"),
        row("a", "Add"),
        row("d", "Delete"),
        Line::from(""),
        row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "                         Esc or ? to close",
            theme::key_hint(),
        )),
    ]);

    frame.render_widget(Paragraph::new(text), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use artesano_core::{CatalogConfig, EntityId, Feedstock, ListView, ProductUsage};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn app(route: &str) -> App {
        let config = CatalogConfig::from_url("http://127.0.0.1:9").unwrap_or_else(|e| panic!("{e}"));
        let catalog = Catalog::new(config).unwrap_or_else(|e| panic!("{e}"));
        App::new(
            catalog,
            &Launch {
                route: route.into(),
                feedstock_page_size: 10,
                product_page_size: 5,
            },
        )
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    fn feedstock(products: Vec<ProductUsage>) -> Arc<Feedstock> {
        Arc::new(Feedstock {
            id: EntityId::new(1),
            code: "CARV-01".into(),
            name: "Carvalho".into(),
            stock: Decimal::from(10),
            unit_of_measure: "M3".into(),
            products,
        })
    }

    #[test]
    fn route_selects_initial_screen() {
        assert_eq!(app("/produtos").active_screen, ScreenId::Products);
        assert_eq!(app("/").active_screen, ScreenId::Home);
        assert_eq!(app("/nope").active_screen, ScreenId::NotFound);
    }

    #[test]
    fn number_keys_switch_screens() {
        let mut app = app("/");
        assert!(matches!(
            press(&mut app, KeyCode::Char('2')),
            Some(Action::SwitchScreen(ScreenId::Feedstocks))
        ));
    }

    #[test]
    fn in_use_feedstock_raises_a_blocking_alert() {
        let mut app = app("/materias-primas");
        let usage = ProductUsage {
            product_id: EntityId::new(4),
            product_code: "MESA-01".into(),
            name: "Mesa".into(),
            unit_price: Decimal::from(1500),
            quantity: Decimal::from(2),
        };
        app.process_action(&Action::RequestDeleteFeedstock {
            feedstock: feedstock(vec![usage]),
            view: ListView::feedstocks(),
        })
        .unwrap_or_else(|e| panic!("{e}"));

        let next = app.action_rx.try_recv().unwrap_or_else(|e| panic!("{e}"));
        let Action::ShowAlert(alert) = next else {
            panic!("expected an alert, got {next:?}");
        };
        assert_eq!(alert.title, " Cannot delete ");
        assert!(alert.message.contains("Carvalho"));
        assert!(alert.message.contains('1'));
        assert!(app.pending_confirm.is_none());

        app.process_action(&Action::ShowAlert(alert))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        assert!(matches!(
            press(&mut app, KeyCode::Enter),
            Some(Action::DismissAlert)
        ));
    }

    #[test]
    fn unused_feedstock_asks_for_confirmation() {
        let mut app = app("/materias-primas");
        app.process_action(&Action::RequestDeleteFeedstock {
            feedstock: feedstock(vec![]),
            view: ListView::feedstocks(),
        })
        .unwrap_or_else(|e| panic!("{e}"));

        let next = app.action_rx.try_recv().unwrap_or_else(|e| panic!("{e}"));
        app.process_action(&next).unwrap_or_else(|e| panic!("{e}"));
        let prompt = app.pending_confirm.as_ref().map(ToString::to_string);
        assert_eq!(prompt.as_deref(), Some("Really delete \"Carvalho\"?"));

        assert!(matches!(
            press(&mut app, KeyCode::Char('n')),
            Some(Action::ConfirmNo)
        ));
    }

    #[tokio::test]
    async fn failed_delete_blocks_until_dismissed() {
        let mut app = app("/produtos");
        app.catalog.start().await;

        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteProduct {
            id: EntityId::new(7),
            name: "Mesa".into(),
            view: ListView::products(),
        }))
        .unwrap_or_else(|e| panic!("{e}"));
        app.process_action(&Action::ConfirmYes)
            .unwrap_or_else(|e| panic!("{e}"));

        let next = tokio::time::timeout(Duration::from_secs(10), app.action_rx.recv())
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        let Some(Action::ShowAlert(alert)) = next else {
            panic!("expected an alert, got {next:?}");
        };
        assert_eq!(alert.message, guard::DELETE_FAILED_MESSAGE);
        assert_eq!(alert.title, " Error ");

        app.process_action(&Action::ShowAlert(alert))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(press(&mut app, KeyCode::Char('2')).is_none());
        assert!(matches!(
            press(&mut app, KeyCode::Esc),
            Some(Action::DismissAlert)
        ));
        app.process_action(&Action::DismissAlert)
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(app.alert.is_none());

        app.catalog.shutdown().await;
    }

    #[test]
    fn search_input_swallows_global_keys() {
        let mut app = app("/materias-primas");
        press(&mut app, KeyCode::Char('/'));
        assert!(press(&mut app, KeyCode::Char('q')).is_none());
        assert!(app.running);
    }
}
