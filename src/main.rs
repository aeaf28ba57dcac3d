use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokefav::action::Action;
use pokefav::catalog::DEFAULT_API_BASE;
use pokefav::config::{Config, DEFAULT_LIST_LIMIT, DEFAULT_TIMEOUT_SECS};
use pokefav::effect::Effect;
use pokefav::pager::DEFAULT_PAGE_SIZE;
use pokefav::reducer::reducer;
use pokefav::session::Session;
use pokefav::state::AppState;
use pokefav::ui::{FavComponentId, FavContext, FavUi};

#[derive(Parser, Debug)]
#[command(name = "pokefav")]
#[command(about = "Browse Pokémon, keep favorites and see their type breakdown")]
struct Args {
    /// Base URL of the catalog API
    #[arg(long, env = "POKEFAV_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// How many entries to request for the master list
    #[arg(long, env = "POKEFAV_LIMIT", default_value_t = DEFAULT_LIST_LIMIT)]
    limit: usize,

    /// Entries revealed per "load more"
    #[arg(long, env = "POKEFAV_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "POKEFAV_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log file path (defaults to the user cache dir)
    #[arg(long, env = "POKEFAV_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            api_base: self.api_base.trim_end_matches('/').to_string(),
            list_limit: self.limit,
            page_size: self.page_size,
            timeout: Duration::from_secs(self.timeout_secs),
            log_file: self.log_file.clone().unwrap_or(defaults.log_file),
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config().validate().map_err(io::Error::other)?;
    pokefav::logging::init(&config.log_file);
    tracing::info!(api_base = %config.api_base, limit = config.list_limit, "starting");

    let session = Session::from_config(&config).map_err(io::Error::other)?;
    let debug = DebugSession::new(args.debug);

    let page_size = config.page_size;
    let list_limit = config.list_limit;
    let state = debug
        .load_state_or_else_async(|| async move {
            Ok::<AppState, io::Error>(AppState::new(page_size, list_limit))
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

    let result = run_app(&mut terminal, &debug, store, replay_actions, session).await;

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
    tracing::info!("shutdown");
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
    session: Session,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(FavUi::new()));
    let mut bus: EventBus<AppState, Action, FavComponentId, FavContext> = EventBus::new();
    let keybindings: Keybindings<FavContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(FavComponentId::EntryList, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(FavComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(FavComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if !state.search.active => match key.code {
            crossterm::event::KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            crossterm::event::KeyCode::Char('/') if state.selected_detail().is_none() => {
                HandlerResponse::action(Action::SearchStart)
            }
            crossterm::event::KeyCode::Tab | crossterm::event::KeyCode::Char('v')
                if state.selected_detail().is_none() =>
            {
                HandlerResponse::action(Action::ViewToggle)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
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
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&session, effect, ctx),
        )
        .await
}

fn handle_effect(session: &Session, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadList { limit, offset } => {
            let session = session.clone();
            ctx.tasks().spawn(TaskKey::new("list"), async move {
                match session.load_list(limit, offset).await {
                    Ok(entries) => Action::ListDidLoad(entries),
                    Err(error) => Action::ListDidError(error.to_string()),
                }
            });
        }
        Effect::ComputeTypeCounts {
            generation,
            favorites,
        } => {
            // One key per run: an older run finishes and is dropped as stale.
            let key = format!("type_counts_{}", generation.value());
            let session = session.clone();
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let counts = session.type_counts(&favorites).await;
                Action::TypeCountsDidLoad { generation, counts }
            });
        }
        Effect::LoadDetail {
            generation,
            name,
            force,
        } => {
            let key = format!("detail_{}", generation.value());
            let session = session.clone();
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let detail = session.detail(&name, force).await;
                Action::DetailDidResolve { generation, detail }
            });
        }
    }
}
