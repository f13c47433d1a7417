use catalog_client::{
    combined_search, Api, CatalogClient, ClientConfig, SearchFilters, SearchQuery, TextRequest,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod browse;
mod render;

#[derive(Debug, Parser)]
#[command(name = "library-browser", version, about = "Browse and search the book catalog")]
struct Cli {
    /// Catalog API root, e.g. http://127.0.0.1:8000/api (overrides CATALOG_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Books per page (overrides CATALOG_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Request timeout in seconds (overrides CATALOG_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Wait until the catalog answers before running the command
    #[arg(long, global = true)]
    wait: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of the catalog
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search the catalog; with no field flag every field is searched
    Search {
        query: String,
        #[arg(long)]
        author: bool,
        #[arg(long)]
        title: bool,
        #[arg(long)]
        text: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print one page of a book's text
    Read {
        book_id: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Word to highlight (spaces are removed)
        #[arg(long)]
        highlight: Option<String>,
    },
    /// Show one book
    Book { book_id: u32 },
    /// List the languages present in the catalog
    Languages,
    /// List books in one language
    ByLanguage { language: String },
    /// Books containing a word, most occurrences first
    Ranked { word: String },
    /// Books where a word's occurrences sit closest together
    Closeness { word: String },
    /// Regular-expression search
    Advanced { pattern: String },
    /// Interactive browsing (default)
    Browse,
}

fn build_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(page_size) = cli.page_size {
        config = config.with_page_size(page_size);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    config.validate()?;
    Ok(config)
}

async fn wait_for_catalog(api: &Api) {
    info!("Waiting for the catalog API to be ready...");

    loop {
        match api.list_books(1, Some(1)).await {
            Ok(_) => {
                info!("Catalog API is ready");
                return;
            }
            Err(e) => warn!("Catalog API not ready: {}", e),
        }
        sleep(Duration::from_secs(2)).await;
    }
}

fn search_progress_bar(json: bool) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    if json {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::with_template(
        "Searching [{bar:40.magenta/white}] {pos:>3}%",
    )?);
    Ok(bar)
}

async fn run(cli: Cli, api: Api, page_size: u32) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    match cli.command.unwrap_or(Command::Browse) {
        Command::List { page } => {
            let book_page = api.list_books(page, Some(page_size)).await?;
            if json {
                render::print_json(&book_page)?;
            } else {
                let max = book_page.max_page(page_size);
                render::print_books(&book_page.results);
                render::print_footer(page.min(max), max, None);
            }
        }
        Command::Search {
            query,
            author,
            title,
            text,
            page,
        } => {
            let query = SearchQuery::new(query)
                .with_filters(SearchFilters::new(author, title, text))
                .with_page(page)
                .with_page_size(page_size);

            let bar = search_progress_bar(json)?;
            let mut sink = |percent: u8| bar.set_position(u64::from(percent));
            let result = combined_search(&*api, &query, Some(&mut sink)).await;
            bar.finish_and_clear();

            if json {
                render::print_json(&result)?;
            } else {
                render::print_suggestions(&result.suggestions);
                render::print_books(&result.books);
                render::print_footer(
                    query.page.min(result.max_page(page_size)),
                    result.max_page(page_size),
                    Some(result.total_occurrences),
                );
            }
        }
        Command::Read {
            book_id,
            page,
            highlight,
        } => {
            let mut request = TextRequest::new(book_id, page);
            if let Some(term) = highlight {
                request = request.with_highlight(term);
            }
            let text_page = api.book_text(&request).await?;
            if json {
                render::print_json(&text_page)?;
            } else {
                render::print_text_page(&text_page, request.page);
            }
        }
        Command::Book { book_id } => {
            let book = api.get_book(book_id).await?;
            if json {
                render::print_json(&book)?;
            } else {
                render::print_book_detail(&book);
            }
        }
        Command::Languages => {
            let languages = api.available_languages().await?;
            if json {
                render::print_json(&languages)?;
            } else {
                println!("{}", languages.join(", "));
            }
        }
        Command::ByLanguage { language } => {
            let books = api.books_by_language(&language).await?;
            render::print_listing(&books, json)?;
        }
        Command::Ranked { word } => {
            let books = api.ranked_search(&word).await?;
            render::print_listing(&books, json)?;
        }
        Command::Closeness { word } => {
            let books = api.closeness_search(&word).await?;
            render::print_listing(&books, json)?;
        }
        Command::Advanced { pattern } => {
            let books = api.advanced_search(&pattern).await?;
            render::print_listing(&books, json)?;
        }
        Command::Browse => browse::run(api, page_size).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("library_browser=info,catalog_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    let page_size = config.page_size;
    info!("Using catalog API at {}", config.base_url);

    let api: Api = Arc::new(CatalogClient::new(config)?);

    if cli.wait {
        wait_for_catalog(&api).await;
    }

    if let Err(e) = run(cli, api, page_size).await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
