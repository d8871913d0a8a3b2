//! Screen identifiers and route resolution.

use std::fmt;

/// Identifies each TUI screen. The first three are in the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home, // 1
    Feedstocks, // 2
    Products,   // 3
    /// Shown for unknown routes; not in the tab bar.
    NotFound,
}

impl ScreenId {
    /// Screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::Feedstocks, Self::Products];

    /// Resolve a route path. Anything unrecognised lands on `NotFound`.
    pub fn from_route(route: &str) -> Self {
        match route.trim().trim_end_matches('/') {
            "" => Self::Home,
            "/materias-primas" => Self::Feedstocks,
            "/produtos" => Self::Products,
            _ => Self::NotFound,
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Feedstocks => "/materias-primas",
            Self::Products => "/produtos",
            Self::NotFound => "",
        }
    }

    /// Number key for this screen; 0 when it has none.
    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Feedstocks => 2,
            Self::Products => 3,
            Self::NotFound => 0,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Feedstocks),
            3 => Some(Self::Products),
            _ => None,
        }
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Feedstocks => "Feedstocks",
            Self::Products => "Products",
            Self::NotFound => "Not found",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
