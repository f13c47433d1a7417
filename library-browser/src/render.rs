use catalog_client::utils::highlight::{segments, strip_page_banner};
use catalog_client::{CatalogItem, Suggestion, TextPage};
use console::style;
use serde::Serialize;

const SUMMARY_CHARS: usize = 100;

/// Renders `<mark>` runs in reverse video.
pub fn styled(text: &str) -> String {
    segments(text)
        .into_iter()
        .map(|segment| {
            if segment.marked {
                style(segment.text).reverse().bold().to_string()
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_books(books: &[CatalogItem]) {
    if books.is_empty() {
        println!("{}", style("No books found").dim());
        return;
    }

    for book in books {
        let mut heading = format!("{:>6}  {}", book.id, styled(&book.title));
        if let Some(occurrences) = book.occurrences {
            heading.push_str(&format!("  ({} occurrences)", occurrences));
        }
        if let Some(score) = book.closeness_score {
            heading.push_str(&format!("  (closeness {:.3})", score));
        }
        println!("{}", style(heading).bold());
        println!("        {}", styled(&book.author_line()));
        println!("        {}", styled(&book.summary_excerpt(SUMMARY_CHARS)));
    }
}

pub fn print_listing(books: &[CatalogItem], json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(books);
    }
    print_books(books);
    println!("{}", style(format!("{} books", books.len())).dim());
    Ok(())
}

pub fn print_book_detail(book: &CatalogItem) {
    println!("{}", style(&book.title).bold());
    println!("Author:    {}", book.author_line());
    if let Some(languages) = &book.languages {
        println!("Languages: {}", languages);
    }
    if let Some(image) = book.image_url() {
        println!("Cover:     {}", image);
    }
    if let Some(summary) = &book.summary {
        println!();
        println!("{}", summary.trim());
    }
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        return;
    }
    let words: Vec<String> = suggestions
        .iter()
        .map(|s| format!("{} ({})", style(&s.word).cyan(), s.occurrences))
        .collect();
    println!("Suggestions: {}", words.join(", "));
}

pub fn print_footer(page: u32, max_page: u32, occurrences: Option<u64>) {
    match occurrences {
        Some(occurrences) => println!(
            "{}",
            style(format!("page {}/{}, {} occurrences", page, max_page, occurrences)).dim()
        ),
        None => println!("{}", style(format!("page {}/{}", page, max_page)).dim()),
    }
}

pub fn print_text_page(page: &TextPage, requested: u32) {
    let (banner, body) = strip_page_banner(&page.text);
    let number = banner.unwrap_or(requested);
    println!(
        "{}",
        style(format!("--- page {}/{} ---", number, page.max_page())).dim()
    );
    println!("{}", styled(body));
    if let Some(total) = page.total_occurrences {
        let pages: Vec<String> = page
            .matching_pages_stats
            .iter()
            .map(|stats| format!("p{}: {}", stats.page_number, stats.occurrences))
            .collect();
        if pages.is_empty() {
            println!("{}", style(format!("{} occurrences", total)).dim());
        } else {
            println!(
                "{}",
                style(format!("{} occurrences ({})", total, pages.join(", "))).dim()
            );
        }
    }
}
