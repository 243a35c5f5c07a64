//! Store-level coordinator flows: dispatch actions, assert state and effects.

use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore};

use pokeverse::{
    action::Action,
    effect::Effect,
    record::Record,
    reducer::reducer,
    state::{AppState, Card, FilterKey, Mode, MSG_NO_RESULTS},
};

fn record(id: u32) -> Record {
    Record {
        id,
        name: format!("mon-{id}"),
        image_url: format!("https://img/{id}.png"),
        primary_type: "fire".into(),
        stats: Vec::new(),
        moves: Vec::new(),
    }
}

fn type_search(store: &mut EffectStore<AppState, Action, Effect>, term: &str) {
    store.dispatch(Action::SearchStart);
    for ch in term.chars() {
        store.dispatch(Action::SearchInput(ch));
    }
}

#[test]
fn test_filter_select_emits_load_effect() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::FilterSelect(FilterKey::Fire));

    assert!(result.changed);
    assert!(store.state().loading);
    assert_eq!(store.state().mode, Mode::Browsing);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::LoadFilter { .. }));
}

#[test]
fn test_filter_load_displays_first_page() {
    let mut store = EffectStore::new(AppState::new(20), reducer);

    store.dispatch(Action::FilterSelect(FilterKey::All));
    let op = store.state().op;
    store.dispatch(Action::FilterDidLoad {
        op,
        filter: FilterKey::All,
        records: (1..=45).map(record).collect(),
        skipped: 0,
    });

    let state = store.state();
    assert!(!state.loading);
    assert_eq!(state.cards.len(), 20);
    assert_eq!(state.pager.total_pages(), 3);
    assert!(state.pager.has_next());
    assert!(!state.pager.has_previous());
}

#[test]
fn test_partial_failures_skip_items_without_aborting() {
    // 10 references, 2 detail fetches failed upstream.
    let mut store = EffectStore::new(AppState::new(20), reducer);

    store.dispatch(Action::FilterSelect(FilterKey::Fire));
    let op = store.state().op;
    store.dispatch(Action::FilterDidLoad {
        op,
        filter: FilterKey::Fire,
        records: (1..=8).map(record).collect(),
        skipped: 2,
    });

    let state = store.state();
    assert_eq!(state.pager.total_items(), 8);
    assert_eq!(state.cards.len(), 8);
    assert_eq!(state.message.as_deref(), Some("Skipped 2 of 10 entries."));
}

#[test]
fn test_filter_error_shows_single_error_card() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::FilterSelect(FilterKey::Ice));
    let op = store.state().op;
    store.dispatch(Action::FilterDidError {
        op,
        filter: FilterKey::Ice,
        error: "502 Bad Gateway".into(),
    });

    let state = store.state();
    assert_eq!(state.mode, Mode::Browsing);
    assert_eq!(state.cards, vec![Card::Error("Ice".into())]);
    assert_eq!(state.pager.total_items(), 0);
}

#[test]
fn test_superseded_filter_result_is_dropped() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::FilterSelect(FilterKey::Fire));
    let stale_op = store.state().op;
    store.dispatch(Action::FilterSelect(FilterKey::Water));

    let result = store.dispatch(Action::FilterDidLoad {
        op: stale_op,
        filter: FilterKey::Fire,
        records: vec![record(4)],
        skipped: 0,
    });

    assert!(!result.changed, "stale result must not win");
    assert!(store.state().cards.is_empty());
    assert!(store.state().loading);
}

#[test]
fn test_search_happy_path_renders_one_minimal_card() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    type_search(&mut store, "25");
    let result = store.dispatch(Action::SearchSubmit);
    assert_eq!(result.effects.len(), 1);
    let Effect::LoadSearch { op, key, term } = result.effects[0].clone() else {
        panic!("expected LoadSearch");
    };
    assert_eq!(key, "25");
    assert_eq!(term, "25");

    store.dispatch(Action::SearchDidLoad {
        op,
        record: record(25),
    });

    let state = store.state();
    assert_eq!(state.mode, Mode::Searching);
    assert_eq!(state.cards, vec![Card::Minimal(record(25))]);
    assert!(!state.loading);
}

#[test]
fn test_blank_search_never_reaches_the_gateway() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    type_search(&mut store, "   ");
    let result = store.dispatch(Action::SearchSubmit);

    assert!(result.effects.is_empty());
    assert_eq!(store.state().mode, Mode::Idle);
    assert!(store.state().cards.is_empty());
    assert_eq!(store.state().message.as_deref(), Some(MSG_NO_RESULTS));
}

#[test]
fn test_search_failure_keeps_the_original_term() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    type_search(&mut store, "Mr  Mime");
    let result = store.dispatch(Action::SearchSubmit);
    let Effect::LoadSearch { op, key, term } = result.effects[0].clone() else {
        panic!("expected LoadSearch");
    };
    assert_eq!(key, "mr-mime");
    assert_eq!(term, "Mr  Mime");

    store.dispatch(Action::SearchDidError {
        op,
        term,
        error: "404 Not Found".into(),
    });

    assert_eq!(store.state().cards, vec![Card::Error("Mr  Mime".into())]);
}

#[test]
fn test_pagination_noop_while_searching_then_resumes() {
    let mut store = EffectStore::new(AppState::new(10), reducer);

    store.dispatch(Action::FilterSelect(FilterKey::All));
    let op = store.state().op;
    store.dispatch(Action::FilterDidLoad {
        op,
        filter: FilterKey::All,
        records: (1..=30).map(record).collect(),
        skipped: 0,
    });

    type_search(&mut store, "25");
    store.dispatch(Action::SearchSubmit);
    let op = store.state().op;
    store.dispatch(Action::SearchDidLoad {
        op,
        record: record(25),
    });

    assert!(!store.dispatch(Action::PageNext).changed);
    assert!(!store.dispatch(Action::PagePrev).changed);
    assert_eq!(store.state().pager.current_page(), 1);

    // Leaving search re-enables browse navigation over the retained data.
    store.dispatch(Action::SearchCancel);
    assert_eq!(store.state().pager.total_items(), 30);
    assert!(store.dispatch(Action::PageNext).changed);
    assert_eq!(store.state().pager.current_page(), 2);
}

#[test]
fn test_action_replay_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(20), reducer);

    harness.dispatch_collect(Action::FilterSelect(FilterKey::Grass));
    harness.assert_state(|s| s.loading);
    harness.assert_state(|s| s.op == 1);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadFilter { .. }));

    let op = 1;
    harness.complete_action(Action::FilterDidLoad {
        op,
        filter: FilterKey::Grass,
        records: (1..=3).map(record).collect(),
        skipped: 0,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.cards.len() == 3);
}

#[test]
fn test_assert_emitted_macros() {
    let actions = vec![
        Action::FilterSelect(FilterKey::Fire),
        Action::SearchStart,
        Action::SearchInput('a'),
    ];

    assert_emitted!(actions, Action::FilterSelect(_));
    assert_emitted!(actions, Action::SearchInput('a'));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::SearchDidError { .. });
}

#[test]
fn test_keyboard_digit_drives_a_filter_load() {
    use crossterm::event::{KeyCode, KeyEvent};

    let mut store = EffectStore::new(AppState::default(), reducer);

    let action = pokeverse::ui::key_action(KeyEvent::from(KeyCode::Char('2')), store.state())
        .expect("digit should map to a filter");
    assert_eq!(action, Action::FilterSelect(FilterKey::Water));

    let result = store.dispatch(action);
    assert!(result.changed);
    assert!(matches!(result.effects[0], Effect::LoadFilter { .. }));
}
