//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::adapters::console_notice::ConsoleNotifier;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_adapter::HttpMarketData;
use crate::adapters::sqlite_adapter::SqliteStorage;
use crate::domain::error::StockwatchError;
use crate::domain::settings::Settings;
use crate::domain::watchlist::{AddOutcome, WatchlistStore};
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::notice_port::NoticePort;
use crate::ports::storage_port::StoragePort;
use crate::screens::{SearchView, WatchlistView, render};
use crate::session;

#[derive(Parser, Debug)]
#[command(name = "stockwatch", about = "Stock symbol search and watchlist")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the listing API, overrides [api] base_url
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Watchlist database file, overrides [storage] path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the listing by symbol or company name
    Search { text: String },
    /// Add a listed symbol to the watchlist
    Add { symbol: String },
    /// Remove a symbol from the watchlist
    Remove { symbol: String },
    /// Show the watchlist with the latest close and gain
    Watchlist,
    /// Show the latest record for one symbol
    Show { symbol: String },
    /// Interactive session over stdin
    Session,
}

/// Everything a command needs: settings, the hydrated-once store and the
/// ports the screens are built from.
pub struct App {
    pub settings: Settings,
    pub store: WatchlistStore,
    pub market: Arc<dyn MarketDataPort>,
    pub notices: Arc<dyn NoticePort>,
}

impl App {
    pub fn new(
        settings: Settings,
        storage: Arc<dyn StoragePort>,
        market: Arc<dyn MarketDataPort>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        let store = WatchlistStore::new(storage, notices.clone(), settings.storage_key.clone());
        Self {
            settings,
            store,
            market,
            notices,
        }
    }

    pub fn from_settings(settings: Settings) -> Result<Self, StockwatchError> {
        let storage = SqliteStorage::from_settings(&settings)?;
        let market = HttpMarketData::from_settings(&settings)?;
        Ok(Self::new(
            settings,
            Arc::new(storage),
            Arc::new(market),
            Arc::new(ConsoleNotifier),
        ))
    }

    pub fn search_view(&self) -> SearchView {
        SearchView::new(self.market.clone(), self.notices.clone())
    }

    pub fn watchlist_view(&self) -> WatchlistView {
        WatchlistView::new(
            self.market.clone(),
            self.notices.clone(),
            self.settings.max_concurrent_fetches,
        )
    }
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();

    let settings = match resolve_settings(cli.config.as_ref(), cli.api_url.as_deref(), cli.db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    runtime.block_on(dispatch(cli.command, settings))
}

async fn dispatch(command: Command, settings: Settings) -> ExitCode {
    let mut app = match App::from_settings(settings) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match command {
        Command::Search { text } => run_search(&app, &text).await,
        Command::Add { symbol } => run_add(&mut app, &symbol).await,
        Command::Remove { symbol } => run_remove(&mut app, &symbol).await,
        Command::Watchlist => run_watchlist(&mut app).await,
        Command::Show { symbol } => run_show(&mut app, &symbol).await,
        Command::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            session::run(&mut app, stdin, &mut stdout)
                .await
                .map(|()| String::new())
        }
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn init_tracing() {
    let log_format =
        std::env::var("STOCKWATCH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    // try_init: tests may install a subscriber first.
    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, StockwatchError> {
    FileConfigAdapter::from_file(path).map_err(|e| StockwatchError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Settings from the optional config file with command-line overrides.
pub fn resolve_settings(
    config_path: Option<&PathBuf>,
    api_url: Option<&str>,
    db_path: Option<PathBuf>,
) -> Result<Settings, StockwatchError> {
    let adapter = match config_path {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };
    Settings::from_config(&adapter)?.with_overrides(api_url, db_path)
}

pub async fn run_search(app: &App, text: &str) -> Result<String, StockwatchError> {
    let mut view = app.search_view();
    view.mount().await?;
    view.set_query(text);
    Ok(render::search_results(&view.results()))
}

pub async fn run_add(app: &mut App, symbol: &str) -> Result<String, StockwatchError> {
    app.store.hydrate().await;
    let mut view = app.search_view();
    view.mount().await?;
    let (symbol, outcome) = view.select(symbol, &mut app.store).await?;
    Ok(match outcome {
        AddOutcome::Added => format!("Added {symbol} to the watchlist\n"),
        AddOutcome::Duplicate => String::new(),
    })
}

pub async fn run_remove(app: &mut App, symbol: &str) -> Result<String, StockwatchError> {
    app.store.hydrate().await;
    let symbol = app
        .store
        .resolve(symbol)
        .unwrap_or(symbol.trim())
        .to_string();
    let removed = app.store.remove(&symbol).await;
    Ok(if removed > 0 {
        format!("Removed {symbol} from the watchlist\n")
    } else {
        format!("{symbol} was not on the watchlist\n")
    })
}

pub async fn run_watchlist(app: &mut App) -> Result<String, StockwatchError> {
    app.store.hydrate().await;
    let mut view = app.watchlist_view();
    view.sync(&app.store).await;
    Ok(render::watchlist(&view))
}

/// Symbols already on the watchlist are matched ignoring case.
pub async fn run_show(app: &mut App, symbol: &str) -> Result<String, StockwatchError> {
    app.store.hydrate().await;
    let symbol = app
        .store
        .resolve(symbol)
        .unwrap_or(symbol.trim())
        .to_string();
    let mut view = app.watchlist_view();
    let record = view.select(&symbol).await?;
    Ok(render::detail(record))
}
