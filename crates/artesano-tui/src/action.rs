//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use artesano_core::{
    EntityId, Feedstock, FeedstockForm, ListView, Product, ProductForm, ResourceState, guard,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// A message that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

impl Alert {
    /// A delete refused before any request was made.
    pub fn blocked(msg: impl Into<String>) -> Self {
        Self {
            title: " Cannot delete ",
            message: msg.into(),
        }
    }

    /// A request that reached the backend and failed.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            title: " Error ",
            message: msg.into(),
        }
    }
}

/// Destructive operation waiting for a yes/no answer. Each carries the
/// list view it was requested from so the follow-up fetch uses it.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteFeedstock {
        feedstock: Arc<Feedstock>,
        view: ListView,
    },
    DeleteProduct {
        id: EntityId,
        name: String,
        view: ListView,
    },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeleteFeedstock { feedstock, .. } => &feedstock.name,
            Self::DeleteProduct { name, .. } => name,
        };
        f.write_str(&guard::confirm_prompt(name))
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,

    // ── Data Events (from the catalog store) ──────────────────────
    FeedstocksUpdated(ResourceState<Feedstock>),
    ProductsUpdated(ResourceState<Product>),
    FeedstockOptionsLoaded(Arc<Vec<Feedstock>>),

    // ── Fetches ───────────────────────────────────────────────────
    LoadFeedstocks(ListView),
    LoadProducts(ListView),
    LoadFeedstockOptions,

    // ── Deletes ───────────────────────────────────────────────────
    RequestDeleteFeedstock {
        feedstock: Arc<Feedstock>,
        view: ListView,
    },
    RequestDeleteProduct {
        id: EntityId,
        name: String,
        view: ListView,
    },
    /// Delete went through; the view holds the cursor to show next.
    FeedstockDeleted(ListView),
    ProductDeleted,

    // ── Creation forms ────────────────────────────────────────────
    SubmitFeedstockForm {
        form: FeedstockForm,
        view: ListView,
    },
    SubmitProductForm {
        form: ProductForm,
        view: ListView,
    },
    FeedstockCreated(ListView),
    ProductCreated(ListView),
    FeedstockFormFailed(String),
    ProductFormFailed(String),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Blocking alert ────────────────────────────────────────────
    ShowAlert(Alert),
    DismissAlert,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
