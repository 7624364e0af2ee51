//! Interactive session: both screens kept alive across commands.
//!
//! The store is hydrated and the search screen mounted once when the
//! session starts; later commands reuse that state.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::cli::App;
use crate::domain::error::StockwatchError;
use crate::domain::watchlist::AddOutcome;
use crate::screens::render;

const HELP: &str = "\
commands:
  search <text>     filter the listing
  pick <n>          add the n-th search result to the watchlist
  add <SYMBOL>      add a listed symbol to the watchlist
  list              show the watchlist
  refresh           reload every watchlist row
  show <SYMBOL>     show the detail panel for a symbol
  remove <SYMBOL>   remove a symbol from the watchlist
  help              show this help
  quit              leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Pick(usize),
    Add(String),
    List,
    Refresh,
    Show(String),
    Remove(String),
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let required = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("{verb} needs {what}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "pick" | "p" => {
                let n = required("a result number")?;
                n.parse()
                    .map(Self::Pick)
                    .map_err(|_| format!("not a result number: {n}"))
            }
            "add" | "a" => required("a symbol").map(Self::Add),
            "list" | "ls" | "l" => Ok(Self::List),
            "refresh" => Ok(Self::Refresh),
            "show" => required("a symbol").map(Self::Show),
            "remove" | "rm" => required("a symbol").map(Self::Remove),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try help)")),
        }
    }
}

pub async fn run<R, W>(app: &mut App, input: R, output: &mut W) -> Result<(), StockwatchError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    app.store.hydrate().await;

    let mut search = app.search_view();
    // A failed mount already raised a notice; the session carries on with
    // an empty listing.
    let _ = search.mount().await;

    let mut watchlist = app.watchlist_view();
    watchlist.sync(&app.store).await;
    write!(output, "{}", render::watchlist(&watchlist))?;
    writeln!(output, "type help for commands")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match SessionCommand::parse(&line) {
            Ok(c) => c,
            Err(message) => {
                writeln!(output, "{message}")?;
                output.flush()?;
                continue;
            }
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => write!(output, "{HELP}")?,
            SessionCommand::Search(text) => {
                search.set_query(&text);
                write!(output, "{}", render::search_results(&search.results()))?;
            }
            SessionCommand::Pick(n) => {
                match search.select_index(n, &mut app.store).await {
                    Ok((symbol, AddOutcome::Added)) => {
                        writeln!(output, "Added {symbol}")?;
                        watchlist.sync(&app.store).await;
                        write!(output, "{}", render::watchlist(&watchlist))?;
                    }
                    Ok((_, AddOutcome::Duplicate)) => {}
                    Err(e) => writeln!(output, "error: {e}")?,
                }
            }
            SessionCommand::Add(symbol) => match search.select(&symbol, &mut app.store).await {
                Ok((symbol, AddOutcome::Added)) => {
                    writeln!(output, "Added {symbol}")?;
                    watchlist.sync(&app.store).await;
                    write!(output, "{}", render::watchlist(&watchlist))?;
                }
                Ok((_, AddOutcome::Duplicate)) => {}
                Err(e) => writeln!(output, "error: {e}")?,
            },
            SessionCommand::List => {
                watchlist.sync(&app.store).await;
                write!(output, "{}", render::watchlist(&watchlist))?;
            }
            SessionCommand::Refresh => {
                watchlist.refresh(&app.store).await;
                write!(output, "{}", render::watchlist(&watchlist))?;
            }
            SessionCommand::Show(symbol) => {
                let symbol = app
                    .store
                    .resolve(&symbol)
                    .map(str::to_string)
                    .unwrap_or(symbol);
                match watchlist.select(&symbol).await {
                    Ok(record) => {
                        let panel = render::detail(record);
                        write!(output, "{}", render::watchlist(&watchlist))?;
                        write!(output, "{panel}")?;
                    }
                    Err(e) => writeln!(output, "error: {e}")?,
                }
            }
            SessionCommand::Remove(symbol) => {
                if watchlist.remove(&symbol, &mut app.store).await == 0 {
                    writeln!(output, "{symbol} was not on the watchlist")?;
                }
                write!(output, "{}", render::watchlist(&watchlist))?;
            }
        }
        output.flush()?;
    }

    Ok(())
}
