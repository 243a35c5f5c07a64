use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::state::FilterKey;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: drop transient flags a restored state may carry.
    Init,

    /// Activate a browse filter (wildcard range or one type).
    FilterSelect(FilterKey),
    /// Result: batch load finished; `skipped` items failed and were dropped.
    FilterDidLoad {
        op: u64,
        filter: FilterKey,
        records: Vec<Record>,
        skipped: usize,
    },
    /// Result: the outer list/type fetch itself failed.
    FilterDidError {
        op: u64,
        filter: FilterKey,
        error: String,
    },

    /// Open the search input.
    SearchStart,
    /// Close the input, or leave search results entirely.
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    /// Result: single lookup succeeded.
    SearchDidLoad { op: u64, record: Record },
    /// Result: lookup failed; `term` is the user's original input.
    SearchDidError {
        op: u64,
        term: String,
        error: String,
    },

    PagePrev,
    PageNext,
    SelectionMove(i16),

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
