//! Filter/search coordinator: every visible-set change clears the card list
//! before repopulating it, and every in-flight operation carries an `op`
//! token so a superseded fetch can never overwrite a newer one.

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::query;
use crate::state::{AppState, Card, Mode, MSG_NO_RESULTS};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            // A restored state may say "loading" with no task to settle it.
            state.loading = false;
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::FilterSelect(filter) => {
            state.mode = Mode::Browsing;
            state.filter = Some(filter);
            state.search.active = false;
            state.search.query.clear();
            state.cards.clear();
            state.selected_card = 0;
            state.message = None;
            let op = state.begin_operation();
            DispatchResult::changed_with(Effect::LoadFilter { op, filter })
        }

        Action::FilterDidLoad {
            op,
            filter: _,
            records,
            skipped,
        } => {
            if !state.is_current_op(op) {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            let total = records.len() + skipped;
            state.pager.initialize(records);
            state.sync_page_cards();
            state.message = if skipped > 0 {
                Some(format!("Skipped {skipped} of {total} entries."))
            } else {
                None
            };
            DispatchResult::changed()
        }

        Action::FilterDidError { op, filter, error } => {
            if !state.is_current_op(op) {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.pager.reset();
            state.cards = vec![Card::Error(filter.label().to_string())];
            state.selected_card = 0;
            state.message = Some(format!("Filter {} error: {error}", filter.label()));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            state.search.query.clear();
            state.message = None;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.pop();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let term = state.search.query.trim().to_string();
            if term.is_empty() {
                // Blank input never reaches the gateway; the visible cards
                // stay as they are.
                state.search.active = false;
                state.message = Some(MSG_NO_RESULTS.to_string());
                return DispatchResult::changed();
            }
            state.mode = Mode::Searching;
            state.search.active = false;
            state.cards.clear();
            state.selected_card = 0;
            state.message = None;
            let op = state.begin_operation();
            DispatchResult::changed_with(Effect::LoadSearch {
                op,
                key: query::lookup_key(&term),
                term,
            })
        }

        Action::SearchDidLoad { op, record } => {
            if !state.is_current_op(op) {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.cards = vec![Card::Minimal(record)];
            state.selected_card = 0;
            DispatchResult::changed()
        }

        Action::SearchDidError { op, term, error } => {
            if !state.is_current_op(op) {
                return DispatchResult::unchanged();
            }
            state.loading = false;
            state.cards = vec![Card::Error(term)];
            state.selected_card = 0;
            state.message = Some(error);
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if state.search.active {
                state.search.active = false;
                state.search.query.clear();
                return DispatchResult::changed();
            }
            if state.mode != Mode::Searching {
                return DispatchResult::unchanged();
            }
            // Leave search; the last filter's loaded data stays in the pager.
            state.mode = Mode::Idle;
            state.cards.clear();
            state.selected_card = 0;
            state.search.query.clear();
            state.message = None;
            DispatchResult::changed()
        }

        Action::PagePrev => turn_page(state, PageTurn::Previous),
        Action::PageNext => turn_page(state, PageTurn::Next),

        Action::SelectionMove(delta) => {
            let mut index = state.selected_card as i16 + delta;
            if index < 0 {
                index = 0;
            }
            if !state.set_selected_card(index as usize) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if !state.loading {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

enum PageTurn {
    Previous,
    Next,
}

fn turn_page(state: &mut AppState, turn: PageTurn) -> DispatchResult<Effect> {
    // Pagination belongs to browse mode only.
    if state.mode == Mode::Searching || state.loading {
        return DispatchResult::unchanged();
    }
    let moved = match turn {
        PageTurn::Previous => state.pager.go_previous(),
        PageTurn::Next => state.pager.go_next(),
    };
    if !moved {
        return DispatchResult::unchanged();
    }
    state.sync_page_cards();
    DispatchResult::changed()
}
