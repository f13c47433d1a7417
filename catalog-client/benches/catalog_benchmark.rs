use catalog_client::models::catalog::CatalogItem;
use catalog_client::utils::highlight::{segments, strip_page_banner};
use catalog_client::{page_count, SearchFilters};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_page(marks: usize) -> String {
    let mut text = String::from("--- PAGE 3 ---\n");
    for i in 0..marks {
        text.push_str("Gallia est omnis divisa in partes tres, quarum unam incolunt ");
        text.push_str("<mark>Belgae</mark>");
        text.push_str(if i % 2 == 0 { ", aliam Aquitani. " } else { ". " });
    }
    text
}

fn benchmark_selector(c: &mut Criterion) {
    c.bench_function("filters_selector", |b| {
        b.iter(|| {
            (0u8..8)
                .map(|bits| {
                    SearchFilters::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0).selector()
                })
                .collect::<Vec<_>>()
        })
    });
}

fn benchmark_page_count(c: &mut Criterion) {
    c.bench_function("page_count", |b| {
        b.iter(|| page_count(black_box(1_234_567), black_box(5)))
    });
}

fn benchmark_highlight_segments(c: &mut Criterion) {
    let small = sample_page(3);
    let large = sample_page(2_000);

    c.bench_function("highlight_segments_small", |b| {
        b.iter(|| segments(strip_page_banner(black_box(&small)).1))
    });

    c.bench_function("highlight_segments_large", |b| {
        b.iter(|| segments(strip_page_banner(black_box(&large)).1))
    });
}

fn benchmark_decode_book_page(c: &mut Criterion) {
    let books: Vec<serde_json::Value> = (1..=50)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Test Book {}", id),
                "author": {"id": id % 50, "name": format!("Test Author {}", id % 50), "birth_year": 1800, "death_year": 1870},
                "languages": "en",
                "summary": "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
                "formats": {"image/jpeg": format!("https://covers.example/{}.jpg", id)}
            })
        })
        .collect();
    let body = serde_json::to_vec(&serde_json::json!({"count": 5000, "results": books})).unwrap();

    c.bench_function("decode_book_page", |b| {
        b.iter(|| {
            serde_json::from_slice::<catalog_client::BookPage>(black_box(&body))
                .unwrap()
                .results
                .iter()
                .map(CatalogItem::author_line)
                .count()
        })
    });
}

criterion_group!(
    benches,
    benchmark_selector,
    benchmark_page_count,
    benchmark_highlight_segments,
    benchmark_decode_book_page
);
criterion_main!(benches);
