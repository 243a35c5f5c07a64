use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventOutcome, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokeverse::action::Action;
use pokeverse::api;
use pokeverse::effect::Effect;
use pokeverse::pager::DEFAULT_ITEMS_PER_PAGE;
use pokeverse::reducer::reducer;
use pokeverse::state::AppState;
use pokeverse::ui;

#[derive(Parser, Debug)]
#[command(name = "pokeverse")]
#[command(about = "Creature catalog TUI with type filters, search and pagination")]
struct Args {
    /// Cards per page while browsing a filter
    #[arg(long, default_value_t = DEFAULT_ITEMS_PER_PAGE)]
    items_per_page: usize,

    /// Gateway base URL (also POKEVERSE_API_URL)
    #[arg(long, default_value = api::DEFAULT_API_BASE)]
    api_url: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    api::set_api_base(args.api_url.clone());
    let items_per_page = args.items_per_page.max(1);

    let debug = DebugSession::new(args.debug);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(items_per_page))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    debug
        .run_effect_app(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            |frame, area, state, _render_ctx: RenderContext| {
                ui::render(frame, area, state);
            },
            |event, state| -> EventOutcome<Action> { ui::handle_event(event, state) },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadFilter { op, filter } => {
            let key = format!("filter_{op}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::load_filter(filter).await {
                    Ok(outcome) => Action::FilterDidLoad {
                        op,
                        filter,
                        records: outcome.records,
                        skipped: outcome.skipped,
                    },
                    Err(error) => Action::FilterDidError {
                        op,
                        filter,
                        error: error.to_string(),
                    },
                }
            });
        }
        Effect::LoadSearch { op, key, term } => {
            let task_key = format!("search_{op}");
            ctx.tasks().spawn(TaskKey::new(task_key), async move {
                match api::fetch_record(&key).await {
                    Ok(record) => Action::SearchDidLoad { op, record },
                    Err(error) => Action::SearchDidError {
                        op,
                        term,
                        error: error.to_string(),
                    },
                }
            });
        }
    }
}
