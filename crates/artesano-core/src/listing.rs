// ── List view state ──
//
// Search term, page cursor and page size for one list screen, plus the
// rules that decide when pagination controls are enabled and where to go
// after a delete.

use artesano_api::types::SearchType;

/// Rows per page on the feedstock list.
pub const FEEDSTOCK_PAGE_SIZE: u32 = 10;
/// Cards per page on the product list.
pub const PRODUCT_PAGE_SIZE: u32 = 5;
/// How many feedstocks the product form's selector loads.
pub const FEEDSTOCK_OPTIONS_LIMIT: u32 = 100;

/// Request parameters derived from a [`ListView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    /// `None` when the search term is blank.
    pub q: Option<String>,
    pub search_type: Option<SearchType>,
}

/// Where a list goes after one of its rows was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterDelete {
    /// The page emptied out; show the previous one.
    StepBack,
    /// Reload the current page.
    Refetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    search_term: String,
    current_page: u32,
    page_size: u32,
    search_type: Option<SearchType>,
}

impl ListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            search_term: String::new(),
            current_page: 0,
            page_size: page_size.max(1),
            search_type: None,
        }
    }

    pub fn feedstocks() -> Self {
        Self::new(FEEDSTOCK_PAGE_SIZE)
    }

    /// Product listing, searching by name until told otherwise.
    pub fn products() -> Self {
        Self {
            search_type: Some(SearchType::Name),
            ..Self::new(PRODUCT_PAGE_SIZE)
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_type(&self) -> Option<SearchType> {
        self.search_type
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the search term. Any change sends the cursor back to page 0.
    /// Returns `true` if a refetch is due.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        self.current_page = 0;
        true
    }

    /// Switch the product search discriminator. Returns `true` if a refetch
    /// is due.
    pub fn set_search_type(&mut self, search_type: SearchType) -> bool {
        if self.search_type == Some(search_type) {
            return false;
        }
        self.search_type = Some(search_type);
        self.current_page = 0;
        true
    }

    /// Drop the search term and reset the search type to its default.
    pub fn clear_filters(&mut self) -> bool {
        let default_type = self.search_type.map(|_| SearchType::default());
        let changed = !self.search_term.is_empty() || self.search_type != default_type;
        self.search_term.clear();
        self.search_type = default_type;
        self.current_page = 0;
        changed
    }

    /// "Next" is enabled unless `(page + 1) * size >= total`.
    pub fn can_next(&self, total: u64) -> bool {
        (u64::from(self.current_page) + 1) * u64::from(self.page_size) < total
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn next_page(&mut self, total: u64) -> bool {
        if !self.can_next(total) {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Highest valid page index for `total` rows.
    pub fn last_page(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages.saturating_sub(1)).unwrap_or(u32::MAX)
    }

    /// Decide where to go after deleting a row from a page that held
    /// `items_on_page` rows, and move the cursor accordingly.
    pub fn after_delete(&mut self, items_on_page: usize) -> AfterDelete {
        if items_on_page == 1 && self.current_page > 0 {
            self.current_page -= 1;
            AfterDelete::StepBack
        } else {
            AfterDelete::Refetch
        }
    }

    pub fn query(&self) -> ListQuery {
        let term = self.search_term.trim();
        ListQuery {
            page: self.current_page,
            size: self.page_size,
            q: (!term.is_empty()).then(|| term.to_owned()),
            search_type: self.search_type,
        }
    }
}
