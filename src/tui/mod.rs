pub mod action;
pub mod state;
pub mod view;

use crate::calendar::Aggregator;
use crate::color_utils::ColorMode;
use crate::config::{Config, ViewMode};
use crate::export::export_file;
use crate::model::CalendarItem;
use crate::storage::{Dataset, LocalStorage};
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::AppState;
use crate::tui::view::draw;
use anyhow::{Result, anyhow};
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::{env, io, time::Duration};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub const USAGE: &str = "Usage: hubcal [--view month|week|day] [--export FILE] [DATA_PATH USER_ID]";

/// Command line, parsed by hand like the rest of the binary's options.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub view: Option<ViewMode>,
    pub export: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
    pub user_id: Option<String>,
}

impl Args {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        let mut positional = Vec::new();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--view" => {
                    let v = iter.next().ok_or_else(|| anyhow!("--view needs a value"))?;
                    parsed.view = Some(v.parse()?);
                }
                "--export" => {
                    let p = iter.next().ok_or_else(|| anyhow!("--export needs a path"))?;
                    parsed.export = Some(PathBuf::from(p));
                }
                s if s.starts_with("--") => return Err(anyhow!("Unknown option {}", s)),
                _ => positional.push(arg),
            }
        }
        match positional.len() {
            0 => {}
            2 => {
                parsed.user_id = positional.pop();
                parsed.data_path = positional.pop().map(PathBuf::from);
            }
            _ => return Err(anyhow!("Expected DATA_PATH and USER_ID together")),
        }
        Ok(parsed)
    }

    /// Positional arguments win over the config file. Defaults stand in
    /// only when no config file exists.
    pub fn resolve_config(&self, loaded: Result<Option<Config>>) -> Result<Config> {
        let mut config = match (loaded?, &self.user_id) {
            (Some(cfg), None) => cfg,
            (Some(mut cfg), Some(user)) => {
                cfg.user_id = user.clone();
                cfg
            }
            (None, Some(user)) => Config::new(user),
            (None, None) => return Err(anyhow!("No config file and no USER_ID given")),
        };
        if let Some(p) = &self.data_path {
            config.data_path = Some(p.clone());
        }
        if let Some(v) = self.view {
            config.default_view = v;
        }
        Ok(config)
    }
}

/// Queues an action without waiting. A full queue drops it, so a held key
/// cannot stall the UI loop behind the loader.
pub fn dispatch(tx: &mpsc::Sender<Action>, action: Action) -> bool {
    match tx.try_send(action) {
        Ok(()) => true,
        Err(TrySendError::Full(dropped)) => {
            debug!("Loader busy, dropping {:?}", dropped);
            false
        }
        Err(TrySendError::Closed(_)) => false,
    }
}

pub fn apply_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::ItemsLoaded(items) => state.set_items(items),
        AppEvent::Error(msg) => {
            state.message = format!("Error: {}", msg);
            state.loading = false;
        }
        AppEvent::Status(msg) => state.message = msg,
    }
}

/// Applies every pending loader event; returns how many there were.
pub fn drain_events(rx: &mut mpsc::Receiver<AppEvent>, state: &mut AppState) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        apply_event(state, event);
        applied += 1;
    }
    applied
}

fn init_logging(to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if to_file
        && let Ok(dir) = LocalStorage::data_dir()
        && let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("hubcal.log"))
    {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
}

async fn load_items(path: PathBuf, aggregator: Aggregator) -> Result<Vec<CalendarItem>, String> {
    let data = tokio::task::spawn_blocking(move || Dataset::load(path))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;
    Ok(aggregator.aggregate(&data))
}

pub async fn run() -> Result<()> {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return Ok(());
        }
    };
    let config = match args.resolve_config(Config::load_optional()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            eprintln!("Or create config at {:?}", Config::get_path());
            return Ok(());
        }
    };
    let data_path = config.data_path()?;

    // --- ONE-SHOT EXPORT ---
    if let Some(out) = &args.export {
        init_logging(false);
        let items = config.aggregator().aggregate(&Dataset::load(&data_path)?);
        export_file(&items, &format!("{} schedule", config.user_id), out)?;
        println!("Wrote {} items to {}", items.len(), out.display());
        return Ok(());
    }

    init_logging(true);
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(dir) = LocalStorage::data_dir()
            && let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join("hubcal_panic.log"))
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let today = Local::now().date_naive();
    let mut app_state = AppState::new(today, config.default_view, config.color_mode);
    let (action_tx, mut action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // SPAWN ACTOR
    let actor_config = config.clone();
    tokio::spawn(async move {
        let mut aggregator = actor_config.aggregator();
        let calendar_name = format!("{} schedule", actor_config.user_id);
        let mut items: Vec<CalendarItem> = Vec::new();

        let mut pending = Some(Action::Reload);
        loop {
            let action = match pending.take() {
                Some(a) => a,
                None => match action_rx.recv().await {
                    Some(a) => a,
                    None => break,
                },
            };
            match action {
                Action::Quit => break,
                Action::Reload => {
                    let _ = event_tx
                        .send(AppEvent::Status("Loading...".to_string()))
                        .await;
                    match load_items(data_path.clone(), aggregator.clone()).await {
                        Ok(loaded) => {
                            items = loaded;
                            info!("Schedule has {} items", items.len());
                            let _ = event_tx.send(AppEvent::ItemsLoaded(items.clone())).await;
                            let _ = event_tx
                                .send(AppEvent::Status(format!("Items: {}", items.len())))
                                .await;
                        }
                        Err(e) => {
                            error!("Loading {}: {}", data_path.display(), e);
                            let _ = event_tx.send(AppEvent::Error(e)).await;
                        }
                    }
                }
                Action::SetColorMode(mode) => {
                    aggregator = aggregator.with_color_mode(mode);
                    pending = Some(Action::Reload);
                }
                Action::Export(path) => match export_file(&items, &calendar_name, &path) {
                    Ok(_) => {
                        let _ = event_tx
                            .send(AppEvent::Status(format!("Exported to {}", path.display())))
                            .await;
                    }
                    Err(e) => {
                        error!("Export failed: {}", e);
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                },
            }
        }
    });

    let export_path = LocalStorage::data_dir()
        .map(|d| d.join("hubcal.ics"))
        .unwrap_or_else(|_| PathBuf::from("hubcal.ics"));

    // UI Loop
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        drain_events(&mut event_rx, &mut app_state);

        if crossterm::event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        dispatch(&action_tx, Action::Quit);
                        break;
                    }
                    KeyCode::Tab => app_state.cycle_view(),
                    KeyCode::Left | KeyCode::Char('h') => app_state.move_days(-1),
                    KeyCode::Right | KeyCode::Char('l') => app_state.move_days(1),
                    KeyCode::Down | KeyCode::Char('j') => {
                        if app_state.view == ViewMode::Day {
                            app_state.next();
                        } else {
                            app_state.move_days(7);
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        if app_state.view == ViewMode::Day {
                            app_state.previous();
                        } else {
                            app_state.move_days(-7);
                        }
                    }
                    KeyCode::Char(']') => app_state.next(),
                    KeyCode::Char('[') => app_state.previous(),
                    KeyCode::Char('n') | KeyCode::PageDown => app_state.next_period(),
                    KeyCode::Char('p') | KeyCode::PageUp => app_state.prev_period(),
                    KeyCode::Char('t') => app_state.go_today(),
                    KeyCode::Enter => app_state.view = ViewMode::Day,
                    KeyCode::Char('r') => {
                        if dispatch(&action_tx, Action::Reload) {
                            app_state.loading = true;
                        } else {
                            app_state.message = "Busy, reload skipped".to_string();
                        }
                    }
                    KeyCode::Char('c') => {
                        let requested = match app_state.color_mode {
                            ColorMode::Type => ColorMode::Priority,
                            ColorMode::Priority => ColorMode::Type,
                        };
                        if dispatch(&action_tx, Action::SetColorMode(requested)) {
                            app_state.color_mode = requested;
                        }
                    }
                    KeyCode::Char('x') => {
                        dispatch(&action_tx, Action::Export(export_path.clone()));
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
