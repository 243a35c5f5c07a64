//! Page cursor over the loaded record list.
//!
//! Single-writer: only the reducer mutates a `Pager`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::Record;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pager {
    items: Vec<Record>,
    current_page: usize,
    items_per_page: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Pager {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Replaces the backing list wholesale and rewinds to page 1.
    pub fn initialize(&mut self, items: Vec<Record>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.current_page = 1;
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// The current page window, clipped to bounds. Out of range yields an
    /// empty slice rather than an error.
    pub fn current_page_items(&self) -> &[Record] {
        let start = (self.current_page - 1).saturating_mul(self.items_per_page);
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(self.items.len());
        &self.items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn go_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn go_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_items: self.items.len(),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
        }
    }
}
