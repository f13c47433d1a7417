use crate::render;
use catalog_client::{Api, BrowseMode, BrowseSession, CatalogResult, ReaderSession, SearchField};
use console::style;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

const HELP: &str = "\
commands:
  n | p                 next / previous page
  s <words>             search (empty clears the search)
  f author|title|text   toggle a search field
  o <id> [word]         open a book, optionally highlighting a word
  h <word>              highlight a word in the open book
  b                     back to the list
  q                     quit";

fn parse_field(name: &str) -> Option<SearchField> {
    SearchField::ALL
        .into_iter()
        .find(|field| field.as_str().eq_ignore_ascii_case(name))
}

fn show_list(session: &BrowseSession) {
    println!();
    if session.mode() == BrowseMode::Search {
        println!(
            "Search: {}  (in {})",
            style(session.query()).bold(),
            session.filters().path_segment()
        );
        render::print_suggestions(session.suggestions());
    }
    render::print_books(session.books());
    let cursor = session.cursor();
    let occurrences = (session.mode() == BrowseMode::Search).then(|| session.total_occurrences());
    render::print_footer(cursor.current(), cursor.max(), occurrences);
}

fn show_reader(reader: &ReaderSession) {
    if let Some(page) = reader.page() {
        println!();
        render::print_text_page(page, reader.cursor().current());
    }
}

fn prompt(reading: bool) {
    print!("{} ", if reading { "read>" } else { "library>" });
    let _ = std::io::stdout().flush();
}

pub async fn run(api: Api, page_size: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BrowseSession::new(api.clone(), page_size);
    let mut reader: Option<ReaderSession> = None;

    session.load_page(1).await?;
    show_list(&session);
    println!("{}", style("type ? for help").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(false);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        let outcome = match command {
            "q" | "quit" => break,
            "?" | "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "" => Ok(()),
            "b" if reader.is_some() => {
                reader = None;
                show_list(&session);
                Ok(())
            }
            _ if reader.is_some() => match reader.as_mut() {
                Some(open) => reader_command(open, command, argument).await,
                None => Ok(()),
            },
            _ => match list_command(&mut session, &api, command, argument).await {
                Ok(Some(opened)) => {
                    reader = Some(opened);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(e) => Err(e),
            },
        };

        if let Err(e) = outcome {
            error!("{}", e);
        }
        prompt(reader.is_some());
    }

    Ok(())
}

async fn reader_command(
    open: &mut ReaderSession,
    command: &str,
    argument: &str,
) -> CatalogResult<()> {
    let result = match command {
        "n" => open.next_page().await.map(|_| ()),
        "p" => open.prev_page().await.map(|_| ()),
        "h" => {
            let term = (!argument.is_empty()).then(|| argument.to_string());
            open.set_highlight(term).await.map(|_| ())
        }
        other => {
            println!("unknown command '{}' while reading, b goes back", other);
            return Ok(());
        }
    };
    if result.is_ok() {
        show_reader(open);
    }
    result
}

async fn list_command(
    session: &mut BrowseSession,
    api: &Api,
    command: &str,
    argument: &str,
) -> CatalogResult<Option<ReaderSession>> {
    match command {
        "n" => session.next_page(None).await.map(|_| show_list(session))?,
        "p" => session.prev_page(None).await.map(|_| show_list(session))?,
        "s" => search(session, argument).await?,
        "f" => match parse_field(argument) {
            Some(field) => {
                session.toggle_filter(field);
                println!("searching in {}", session.filters().path_segment());
            }
            None => println!("unknown field '{}'", argument),
        },
        "o" => {
            let mut parts = argument.split_whitespace();
            let Some(book_id) = parts.next().and_then(|id| id.parse::<u32>().ok()) else {
                println!("usage: o <book id> [word]");
                return Ok(None);
            };
            let mut open = ReaderSession::new(api.clone(), book_id);
            let term = parts.collect::<Vec<_>>().join(" ");
            if !term.is_empty() {
                open = open.with_highlight(term);
            } else if session.mode() == BrowseMode::Search {
                open = open.with_highlight(session.query());
            }
            open.open().await?;
            show_reader(&open);
            return Ok(Some(open));
        }
        other => println!("unknown command '{}', type ? for help", other),
    }
    Ok(None)
}

async fn search(session: &mut BrowseSession, words: &str) -> CatalogResult<()> {
    let bar = indicatif::ProgressBar::new(100);
    let mut sink = |percent: u8| bar.set_position(u64::from(percent));
    let result = session.search(words, Some(&mut sink)).await;
    bar.finish_and_clear();
    result.map(|_| show_list(session))
}
