//! Interactive listing session on stdin.
//!
//! Typed searches go through the debouncer, so only the last search of a
//! quick succession of `/...` lines is fetched.

use std::io::Write;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::listing_controller;
use crate::config::Config;
use crate::detail::{DetailOutcome, detail_route, parse_detail_route};
use crate::display::{format_listing, format_profile};
use crate::error::{Result, UserdexError};
use crate::listing::{Debouncer, ListingController};
use crate::remote::CollectionSource;
use crate::state::KeyValueStore;
use crate::types::Gender;

const HELP: &str = "\
Commands:
  /TEXT          search for TEXT (debounced)
  /              clear the search
  gender G       filter by male, female or all
  page N         jump to page N
  next, prev     move one page
  open N         show the N-th user on this page
  show ID        show a cached user by id
  back           return to the listing
  retry          repeat the last failed request
  clear          reset search, gender and page
  help           show this help
  quit           leave";

/// One line of input in the interactive browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Gender(Option<Gender>),
    Page(u32),
    Next,
    Prev,
    Open(usize),
    Show(String),
    Back,
    Retry,
    Clear,
    Help,
    Quit,
    Redraw,
}

/// Parse one input line.
pub fn parse_browse_command(line: &str) -> Result<BrowseCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(text) = line.strip_prefix('/') {
        return Ok(BrowseCommand::Search(text.to_string()));
    }

    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(BrowseCommand::Redraw);
    };
    let arg = parts.next();

    let command = match (word.to_lowercase().as_str(), arg) {
        ("gender", Some("all")) => BrowseCommand::Gender(None),
        ("gender", Some(g)) => BrowseCommand::Gender(Some(g.parse()?)),
        ("page", Some(n)) => BrowseCommand::Page(
            n.parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| UserdexError::InvalidPage(n.to_string()))?,
        ),
        ("next" | "n", None) => BrowseCommand::Next,
        ("prev" | "p", None) => BrowseCommand::Prev,
        ("open" | "o", Some(n)) => BrowseCommand::Open(
            n.parse::<usize>()
                .ok()
                .filter(|i| *i >= 1)
                .ok_or_else(|| UserdexError::Other(format!("invalid card number '{n}'")))?,
        ),
        ("show", Some(id)) => BrowseCommand::Show(id.to_string()),
        ("back" | "b", None) => BrowseCommand::Back,
        ("retry" | "r", None) => BrowseCommand::Retry,
        ("clear", None) => BrowseCommand::Clear,
        ("help" | "?", None) => BrowseCommand::Help,
        ("quit" | "exit" | "q", None) => BrowseCommand::Quit,
        _ => {
            return Err(UserdexError::Other(format!(
                "unknown command '{}', type 'help' for a list",
                line.trim()
            )));
        }
    };
    Ok(command)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Listing,
    Detail(String),
}

/// Run the interactive browser until `quit` or end of input.
pub async fn cmd_browse() -> Result<()> {
    let config = Config::load()?;
    let mut ctl = listing_controller(&config)?;
    let mut debouncer = Debouncer::new(config.search_debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut screen = Screen::Listing;

    println!("{}", "Type 'help' for commands.".dimmed());
    ctl.sync().await;
    render(&ctl, &screen);

    loop {
        prompt()?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match parse_browse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{} {}", "error:".red(), e);
                        continue;
                    }
                };
                if command == BrowseCommand::Quit {
                    break;
                }
                match handle(&mut ctl, &mut debouncer, &mut screen, command).await {
                    Ok(true) => render(&ctl, &screen),
                    Ok(false) => {}
                    Err(e) => eprintln!("{} {}", "error:".red(), e),
                }
            }
            text = debouncer.ready() => {
                ctl.on_search(&text);
                screen = Screen::Listing;
                println!();
                ctl.sync().await;
                render(&ctl, &screen);
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Apply one command. Returns whether the screen should be redrawn.
async fn handle<S, K>(
    ctl: &mut ListingController<S, K>,
    debouncer: &mut Debouncer<String>,
    screen: &mut Screen,
    command: BrowseCommand,
) -> Result<bool>
where
    S: CollectionSource,
    K: KeyValueStore,
{
    match command {
        BrowseCommand::Search(text) => {
            debouncer.schedule(text);
            return Ok(false);
        }
        BrowseCommand::Gender(gender) => {
            ctl.on_gender_change(gender);
            *screen = Screen::Listing;
            ctl.sync().await;
        }
        BrowseCommand::Page(page) => {
            ctl.on_page_change(page)?;
            *screen = Screen::Listing;
            ctl.sync().await;
        }
        BrowseCommand::Next => {
            let next = ctl
                .page()
                .checked_add(1)
                .filter(|_| ctl.view().pagination.has_next_page)
                .ok_or_else(|| UserdexError::Other("already on the last page".to_string()))?;
            ctl.on_page_change(next)?;
            *screen = Screen::Listing;
            ctl.sync().await;
        }
        BrowseCommand::Prev => {
            if ctl.page() <= 1 {
                return Err(UserdexError::Other("already on the first page".to_string()));
            }
            ctl.on_page_change(ctl.page() - 1)?;
            *screen = Screen::Listing;
            ctl.sync().await;
        }
        BrowseCommand::Open(n) => {
            let user = ctl.view().records.get(n - 1).cloned().ok_or_else(|| {
                UserdexError::Other(format!("no user #{n} on this page"))
            })?;
            let route = ctl.on_record_activate(&user);
            let id = parse_detail_route(&route).unwrap_or(user.id()).to_string();
            *screen = Screen::Detail(id);
        }
        BrowseCommand::Show(id) => {
            *screen = Screen::Detail(id);
        }
        BrowseCommand::Back => {
            ctl.store_mut().select(None);
            *screen = Screen::Listing;
        }
        BrowseCommand::Retry => {
            if ctl.retry().await.is_none() {
                ctl.sync().await;
            }
            *screen = Screen::Listing;
        }
        BrowseCommand::Clear => {
            debouncer.cancel();
            ctl.clear_filters();
            *screen = Screen::Listing;
            ctl.sync().await;
        }
        BrowseCommand::Help => {
            println!("{HELP}");
            return Ok(false);
        }
        BrowseCommand::Redraw => {}
        BrowseCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn render<S, K>(ctl: &ListingController<S, K>, screen: &Screen)
where
    S: CollectionSource,
    K: KeyValueStore,
{
    match screen {
        Screen::Listing => print!("{}", format_listing(ctl.view(), &ctl.filter(), false)),
        Screen::Detail(id) => match DetailOutcome::resolve(ctl.store(), id) {
            DetailOutcome::Found(user) => {
                println!("{}", detail_route(user.id()).dimmed());
                print!("{}", format_profile(user));
            }
            DetailOutcome::NotFound { id, message } => {
                println!("{}", detail_route(&id).dimmed());
                println!("{} ({})", message.yellow(), id);
            }
        },
    }
}
