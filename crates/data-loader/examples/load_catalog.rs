use data_loader::{Corpus, LoadOptions, DEFAULT_CATALOG_PATH};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    // Usage: cargo run --example load_catalog [path/to/movies.csv]
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

    println!("Loading movie catalog from {}...\n", path.display());

    let start = Instant::now();
    let (corpus, report) = Corpus::load(&path, &LoadOptions::default())
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let tokens: usize = corpus.iter().map(|r| r.tokens.len()).sum();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Rows read: {}", report.rows_read);
    println!("Records: {}", report.accepted);
    println!("Adult rows skipped: {}", report.skipped_adult);
    println!("Malformed rows skipped: {}", report.skipped_malformed);
    println!("Tokens: {}", tokens);
    println!("\nPerformance: {:.0} rows/second",
             report.rows_read as f64 / elapsed.as_secs_f64());
}
