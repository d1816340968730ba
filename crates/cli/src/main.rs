use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{LoadOptions, MalformedRowPolicy, DEFAULT_CATALOG_PATH, DEFAULT_MAX_RECORDS};
use pipeline::{SearchConfig, DEFAULT_MIN_POPULARITY};
use server::{MovieRecommendation, RecommendationOrchestrator, RecommendationRequest, RecommenderConfig};
use similarity::QueryDescription;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// movie-match - Content-based movie recommender
#[derive(Parser)]
#[command(name = "movie-match")]
#[command(about = "Recommend a similar movie from a catalog using TF-IDF similarity", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(short, long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Maximum number of catalog rows to accept
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: usize,

    /// Popularity a movie must exceed to be recommended
    #[arg(long, default_value_t = DEFAULT_MIN_POPULARITY)]
    min_popularity: f64,

    /// Fail on the first malformed catalog row instead of skipping it
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a movie similar to a free-text description
    Recommend {
        /// Title the description belongs to (never recommended back)
        #[arg(long)]
        title: String,

        /// Free-text description to match against the catalog
        #[arg(long)]
        description: String,

        /// Title originally searched for (defaults to --title)
        #[arg(long)]
        searched_title: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend from a synopsis and genre line
    Suggest {
        /// Title the synopsis belongs to
        #[arg(long)]
        title: String,

        /// Plot synopsis
        #[arg(long)]
        synopsis: String,

        /// Genre line, weighted above synopsis words
        #[arg(long)]
        genre: Option<String>,

        /// Title originally searched for (defaults to --title)
        #[arg(long)]
        searched_title: Option<String>,
    },

    /// Show catalog load statistics
    Stats,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    tracing::debug!("Recommender settings: {:?}", config);

    // Load and vectorise the catalog (this may take a moment)
    eprintln!("Loading movie catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let orchestrator = RecommendationOrchestrator::from_catalog(&cli.catalog, &config)
        .context("Failed to build recommender")?;
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        orchestrator.corpus().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    let mut stdout = io::stdout();
    match cli.command {
        Commands::Recommend {
            title,
            description,
            searched_title,
            json,
        } => handle_recommend(&mut stdout, &orchestrator, title, description, searched_title, json)?,
        Commands::Suggest {
            title,
            synopsis,
            genre,
            searched_title,
        } => {
            let description = QueryDescription::compose(&synopsis, genre.as_deref());
            handle_recommend(&mut stdout, &orchestrator, title, description, searched_title, false)?
        }
        Commands::Stats => handle_stats(&mut stdout, &orchestrator)?,
        Commands::Benchmark { requests } => handle_benchmark(orchestrator, requests).await?,
    }

    Ok(())
}

/// Map command-line flags onto recommender settings
fn build_config(cli: &Cli) -> RecommenderConfig {
    let policy = if cli.strict {
        MalformedRowPolicy::Abort
    } else {
        MalformedRowPolicy::Skip
    };

    RecommenderConfig::new()
        .with_load_options(
            LoadOptions::default()
                .with_max_records(cli.max_records)
                .with_malformed_rows(policy),
        )
        .with_search_config(
            SearchConfig::new().with_min_popularity(cli.min_popularity),
        )
}

/// Handle the 'recommend' and 'suggest' commands
fn handle_recommend(
    out: &mut impl Write,
    orchestrator: &RecommendationOrchestrator,
    title: String,
    description: String,
    searched_title: Option<String>,
    json: bool,
) -> Result<()> {
    let searched_title = searched_title.unwrap_or_else(|| title.clone());
    let request = RecommendationRequest::new(title, description, searched_title);

    let recommendation = orchestrator.recommend(&request)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &recommendation)?;
        writeln!(out)?;
    } else {
        print_recommendation(out, &recommendation)?;
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(out: &mut impl Write, orchestrator: &RecommendationOrchestrator) -> Result<()> {
    writeln!(out, "{}", "Catalog statistics:".bold().blue())?;

    if let Some(report) = orchestrator.load_report() {
        writeln!(out, "{}Rows read: {}", "• ".green(), report.rows_read)?;
        writeln!(out, "{}Accepted: {}", "• ".green(), report.accepted)?;
        writeln!(out, "{}Adult rows skipped: {}", "• ".green(), report.skipped_adult)?;
        writeln!(out, "{}Malformed rows skipped: {}", "• ".green(), report.skipped_malformed)?;
        if report.truncated {
            writeln!(out, "{}Stopped at the record cap", "• ".yellow())?;
        }
    }

    let corpus = orchestrator.corpus();
    let total_tokens: usize = corpus.iter().map(|r| r.tokens.len()).sum();
    let avg_tokens = if corpus.is_empty() {
        0.0
    } else {
        total_tokens as f64 / corpus.len() as f64
    };
    writeln!(out, "{}Vocabulary size: {}", "• ".cyan(), orchestrator.idf().len())?;
    writeln!(out, "{}Average tokens per movie: {:.1}", "• ".cyan(), avg_tokens)?;
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(orchestrator: RecommendationOrchestrator, requests: usize) -> Result<()> {
    let corpus_len = orchestrator.corpus().len();
    if corpus_len == 0 {
        bail!("Cannot benchmark an empty catalog");
    }
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    // Use random catalog entries as queries
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for _ in 0..requests {
        let position = rand::random_range(0..corpus_len);
        let request = match orchestrator.corpus().get(position) {
            Some(record) => RecommendationRequest::new(
                record.title.clone(),
                record.tokens.join(" "),
                record.title.clone(),
            ),
            None => continue,
        };

        let orchestrator = orchestrator.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            orchestrator.recommend(&request)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    timings.sort();
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        timings.len() as f64 / wall_time.as_secs_f64()
    );

    Ok(())
}

/// Helper function to format and print a recommendation
fn print_recommendation(out: &mut impl Write, recommendation: &MovieRecommendation) -> io::Result<()> {
    if recommendation.is_found() {
        writeln!(
            out,
            "Based on {} we recommend watching {}",
            recommendation.source_title.bold(),
            recommendation.recommended_title.green().bold()
        )?;
        writeln!(
            out,
            "   Similarity: {:.3}, Popularity: {:.1}",
            recommendation.similarity,
            recommendation.popularity.unwrap_or_default()
        )
    } else {
        writeln!(
            out,
            "{} for {}",
            recommendation.recommended_title.yellow(),
            recommendation.source_title.bold()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{normalize, Corpus, MovieRecord};
    use pipeline::NO_RECOMMENDATION;

    fn build_test_orchestrator() -> RecommendationOrchestrator {
        let record = |id: &str, title: &str, text: &str, popularity: f64| {
            MovieRecord::new(id, title, normalize(text), popularity)
        };
        let corpus = Corpus::from(vec![
            record("1", "The Matrix", "hacker simulation reality machines war", 33.4),
            record("3", "Dark City", "simulation reality memories strangers city", 12.1),
            record("5", "Finding Nemo", "ocean fish father son", 25.5),
        ]);
        RecommendationOrchestrator::new(corpus, &RecommenderConfig::default())
    }

    fn run_recommend(title: &str, description: &str, json: bool) -> String {
        let orchestrator = build_test_orchestrator();
        let mut out = Vec::new();
        handle_recommend(
            &mut out,
            &orchestrator,
            title.to_string(),
            description.to_string(),
            None,
            json,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_output_is_only_json() {
        let output = run_recommend("The Matrix", "a hacker learns reality is a simulation", true);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["recommended_title"], "Dark City");
        assert_eq!(value["source_title"], "The Matrix");
        assert_eq!(value["movie_id"], "3");
    }

    #[test]
    fn test_json_output_for_no_recommendation() {
        let output = run_recommend("Jaws", "shark beach summer", true);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["recommended_title"], NO_RECOMMENDATION);
        assert!(value["movie_id"].is_null());
    }

    #[test]
    fn test_text_output_names_recommendation() {
        let output = run_recommend("The Matrix", "simulation reality", false);
        assert!(output.contains("Dark City"));
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_err());
    }

    #[test]
    fn test_default_catalog_path() {
        let cli = Cli::try_parse_from(["movie-match", "stats"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(cli.max_records, DEFAULT_MAX_RECORDS);
        assert!(!cli.strict);
    }

    #[test]
    fn test_stats_output() {
        let orchestrator = build_test_orchestrator();
        let mut out = Vec::new();
        handle_stats(&mut out, &orchestrator).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Vocabulary size"));
        assert!(output.contains("Average tokens per movie"));
    }
}
