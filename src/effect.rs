use crate::state::FilterKey;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the filter's item references, then every detail sequentially.
    LoadFilter { op: u64, filter: FilterKey },
    /// Fetch one record by resolved lookup key. `term` is the raw input,
    /// carried through for the error card.
    LoadSearch { op: u64, key: String, term: String },
}
