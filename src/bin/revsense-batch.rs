//! Headless CSV analysis: prints one tab-separated line per review and the
//! sentiment distribution.

use std::path::PathBuf;

use revsense::batch::ingest_csv;
use revsense::chart::sentiment_distribution;
use revsense::config;
use revsense::logging::{self, ConsoleTarget};
use revsense::sentiment::load_predictor;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init_with_console(ConsoleTarget::Stderr) {
        eprintln!("Logging disabled: {err}");
    }
    let config = config::load_or_default().map_err(|err| err.to_string())?;
    let base = std::env::current_dir().map_err(|err| err.to_string())?;
    let defaults = config.artifacts.resolved_against(&base);
    let vectorizer = options.vectorizer.unwrap_or(defaults.vectorizer_path);
    let model = options.model.unwrap_or(defaults.model_path);

    let predictor = load_predictor(&vectorizer, &model).map_err(|err| err.to_string())?;
    let records = ingest_csv(&options.csv, &predictor).map_err(|err| err.to_string())?;

    if !options.summary_only {
        for record in &records {
            println!(
                "{}\t{}\t{}",
                single_line(&record.text),
                record.sentiment.display_label(),
                record.intent
            );
        }
    }
    println!("reviews: {}", records.len());
    for share in sentiment_distribution(&records) {
        println!(
            "{:<12} {:>6}  {:>6}",
            share.label,
            share.count,
            share.percent_label()
        );
    }
    Ok(())
}

#[derive(Debug)]
struct CliOptions {
    csv: PathBuf,
    vectorizer: Option<PathBuf>,
    model: Option<PathBuf>,
    summary_only: bool,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut csv: Option<PathBuf> = None;
    let mut vectorizer: Option<PathBuf> = None;
    let mut model: Option<PathBuf> = None;
    let mut summary_only = false;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--vectorizer" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--vectorizer requires a value".to_string())?;
                vectorizer = Some(PathBuf::from(value));
            }
            "--model" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--model requires a value".to_string())?;
                model = Some(PathBuf::from(value));
            }
            "--summary" => summary_only = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown argument: {other}\n\n{}", help_text()));
            }
            other => {
                if csv.is_some() {
                    return Err(format!("Unexpected extra argument: {other}"));
                }
                csv = Some(PathBuf::from(other));
            }
        }
        idx += 1;
    }

    let csv = csv.ok_or_else(help_text)?;
    Ok(CliOptions {
        csv,
        vectorizer,
        model,
        summary_only,
    })
}

/// Keep one record per output line.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn help_text() -> String {
    [
        "revsense-batch",
        "",
        "Analyze every review in a CSV file without opening the window.",
        "",
        "Usage:",
        "  revsense-batch <reviews.csv> [--vectorizer PATH] [--model PATH] [--summary]",
        "",
        "Options:",
        "  --vectorizer PATH  Vectorizer artifact (default: from config).",
        "  --model PATH       Classifier artifact (default: from config).",
        "  --summary          Print only the sentiment distribution.",
    ]
    .join("\n")
}
