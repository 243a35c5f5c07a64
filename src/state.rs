use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::pager::{Pager, DEFAULT_ITEMS_PER_PAGE};
use crate::record::Record;

/// Id range backing the wildcard filter.
pub const ALL_RANGE_START: u32 = 1;
pub const ALL_RANGE_END: u32 = 151;

pub const MSG_NO_RESULTS: &str = "No results found.";

/// Named browse categories. `All` browses the base id range; the rest map to
/// API type keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FilterKey {
    All,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl FilterKey {
    pub const ALL: [FilterKey; 10] = [
        FilterKey::All,
        FilterKey::Fire,
        FilterKey::Water,
        FilterKey::Grass,
        FilterKey::Electric,
        FilterKey::Psychic,
        FilterKey::Ice,
        FilterKey::Dragon,
        FilterKey::Dark,
        FilterKey::Fairy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::All => "All",
            FilterKey::Fire => "Fire",
            FilterKey::Water => "Water",
            FilterKey::Grass => "Grass",
            FilterKey::Electric => "Electric",
            FilterKey::Psychic => "Psychic",
            FilterKey::Ice => "Ice",
            FilterKey::Dragon => "Dragon",
            FilterKey::Dark => "Dark",
            FilterKey::Fairy => "Fairy",
        }
    }

    /// API type key, `None` for the wildcard.
    pub fn api_type(&self) -> Option<&'static str> {
        match self {
            FilterKey::All => None,
            FilterKey::Fire => Some("fire"),
            FilterKey::Water => Some("water"),
            FilterKey::Grass => Some("grass"),
            FilterKey::Electric => Some("electric"),
            FilterKey::Psychic => Some("psychic"),
            FilterKey::Ice => Some("ice"),
            FilterKey::Dragon => Some("dragon"),
            FilterKey::Dark => Some("dark"),
            FilterKey::Fairy => Some("fairy"),
        }
    }

    pub fn next(&self) -> FilterKey {
        let index = Self::ALL
            .iter()
            .position(|key| key == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Mutually exclusive viewing modes. Pagination only applies while browsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Mode {
    #[default]
    Idle,
    Browsing,
    Searching,
}

/// One visible card. The whole list is rebuilt on every transition, never
/// patched in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Card {
    Minimal(Record),
    Error(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub mode: Mode,
    pub filter: Option<FilterKey>,
    pub pager: Pager,
    pub cards: Vec<Card>,
    pub selected_card: usize,
    pub search: SearchState,
    pub loading: bool,
    /// Monotonic operation token; results carrying an older token are stale.
    pub op: u64,
    pub message: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl AppState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            terminal_size: (80, 24),
            mode: Mode::Idle,
            filter: None,
            pager: Pager::new(items_per_page),
            cards: Vec::new(),
            selected_card: 0,
            search: SearchState::default(),
            loading: false,
            op: 0,
            message: None,
            tick: 0,
        }
    }

    pub fn begin_operation(&mut self) -> u64 {
        self.op += 1;
        self.loading = true;
        self.op
    }

    pub fn is_current_op(&self, op: u64) -> bool {
        self.op == op
    }

    /// Clears the visible cards and repopulates them from the current pager
    /// window. The container never mixes two operations' results.
    pub fn sync_page_cards(&mut self) {
        self.cards.clear();
        self.cards.extend(
            self.pager
                .current_page_items()
                .iter()
                .cloned()
                .map(Card::Minimal),
        );
        self.selected_card = 0;
    }

    pub fn selected_record(&self) -> Option<&Record> {
        match self.cards.get(self.selected_card)? {
            Card::Minimal(record) => Some(record),
            Card::Error(_) => None,
        }
    }

    pub fn set_selected_card(&mut self, index: usize) -> bool {
        if self.cards.is_empty() {
            self.selected_card = 0;
            return false;
        }
        let bounded = index.min(self.cards.len() - 1);
        if bounded != self.selected_card {
            self.selected_card = bounded;
            return true;
        }
        false
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("mode", ron_string(&self.mode))
                .entry("filter", ron_string(&self.filter))
                .entry("cards", ron_string(&self.cards.len()))
                .entry("selected", ron_string(&self.selected_card))
                .entry("page", ron_string(&self.pager.current_page()))
                .entry("total_items", ron_string(&self.pager.total_items())),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query)),
            DebugSection::new("Status")
                .entry("loading", ron_string(&self.loading))
                .entry("op", ron_string(&self.op))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
