//! Developer utility to train the vectorizer and sentiment classifier artifacts
//! from a labeled review CSV.

use std::fs::File;
use std::path::PathBuf;

use revsense::logging::{self, ConsoleTarget};
use revsense::ml::logreg::TrainOptions;
use revsense::ml::metrics::{accuracy, precision_recall_by_class};
use revsense::sentiment::training::{read_labeled_csv, split_by_hash, train_artifacts};
use revsense::sentiment::{FitOptions, Norm, save_json};

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
    let file = File::open(&options.data)
        .map_err(|err| format!("Failed to open {}: {err}", options.data.display()))?;
    let rows = read_labeled_csv(file).map_err(|err| err.to_string())?;
    if rows.is_empty() {
        return Err("Training CSV has no labeled rows".to_string());
    }
    let (train, test) = split_by_hash(rows, options.test_fraction);
    println!("rows: train={} test={}", train.len(), test.len());

    let trained = train_artifacts(&train, &options.fit, &options.train)
        .map_err(|err| err.to_string())?;
    let mut model = trained.model.clone();
    model.temperature = options.temperature;

    std::fs::create_dir_all(&options.out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", options.out_dir.display()))?;
    let vectorizer_path = options.out_dir.join("vectorizer.json");
    let model_path = options.out_dir.join("sentiment_model.json");
    save_json(&vectorizer_path, &trained.vectorizer).map_err(|err| err.to_string())?;
    save_json(&model_path, &model).map_err(|err| err.to_string())?;
    println!("vocabulary: {}", trained.vectorizer.dim());
    println!("wrote {}", vectorizer_path.display());
    println!("wrote {}", model_path.display());

    let (label, eval_rows) = if test.is_empty() {
        ("train", &train)
    } else {
        ("test", &test)
    };
    let cm = trained.evaluate(eval_rows);
    println!("{label} accuracy: {:.4}", accuracy(&cm));
    for (idx, stats) in precision_recall_by_class(&cm).iter().enumerate() {
        println!(
            "class {:>2} {:<12}  precision={:.3}  recall={:.3}  f1={:.3}  support={}",
            idx,
            model.classes[idx],
            stats.precision,
            stats.recall,
            stats.f1(),
            stats.support
        );
    }
    println!("confusion matrix (rows=true, cols=pred):");
    for truth in 0..cm.n_classes {
        let mut row = String::new();
        for pred in 0..cm.n_classes {
            row.push_str(&format!("{:6}", cm.get(truth, pred)));
        }
        println!("{row}");
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct CliOptions {
    data: PathBuf,
    out_dir: PathBuf,
    test_fraction: f64,
    temperature: f32,
    fit: FitOptions,
    train: TrainOptions,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut data: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from(".");
    let mut test_fraction = 0.2f64;
    let mut temperature = 1.0f32;
    let mut fit = FitOptions::default();
    let mut train = TrainOptions::default();

    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "-h" | "--help" => return Err(help_text()),
            "--data" => data = Some(PathBuf::from(take_value(&args, &mut idx, flag)?)),
            "--out-dir" => out_dir = PathBuf::from(take_value(&args, &mut idx, flag)?),
            "--test-fraction" => {
                test_fraction = parse_value(&args, &mut idx, flag)?;
                if !(0.0..1.0).contains(&test_fraction) {
                    return Err(format!("--test-fraction must be in [0, 1): {test_fraction}"));
                }
            }
            "--ngram-max" => fit.ngram_max = parse_value(&args, &mut idx, flag)?,
            "--min-df" => fit.min_df = parse_value(&args, &mut idx, flag)?,
            "--max-features" => {
                let value: usize = parse_value(&args, &mut idx, flag)?;
                fit.max_features = (value > 0).then_some(value);
            }
            "--no-idf" => fit.use_idf = false,
            "--sublinear-tf" => fit.sublinear_tf = true,
            "--no-norm" => fit.norm = Norm::None,
            "--epochs" => train.epochs = parse_value(&args, &mut idx, flag)?,
            "--learning-rate" => train.learning_rate = parse_value(&args, &mut idx, flag)?,
            "--l2" => train.l2 = parse_value(&args, &mut idx, flag)?,
            "--batch-size" => train.batch_size = parse_value(&args, &mut idx, flag)?,
            "--seed" => train.seed = parse_value(&args, &mut idx, flag)?,
            "--no-balance" => train.balance_classes = false,
            "--temperature" => temperature = parse_value(&args, &mut idx, flag)?,
            other => return Err(format!("Unknown argument: {other}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let data = data.ok_or_else(|| format!("--data is required\n\n{}", help_text()))?;
    if train.batch_size == 0 {
        train.batch_size = 1;
    }
    Ok(CliOptions {
        data,
        out_dir,
        test_fraction,
        temperature,
        fit,
        train,
    })
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    idx: &mut usize,
    flag: &str,
) -> Result<T, String> {
    let value = take_value(args, idx, flag)?;
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {flag} value: {value}"))
}

fn help_text() -> String {
    [
        "revsense-train",
        "",
        "Train vectorizer.json and sentiment_model.json from a labeled CSV.",
        "The CSV needs a review column (Review, Text, review, text) and a",
        "label column (sentiment or label).",
        "",
        "Usage:",
        "  revsense-train --data <labeled.csv> [options]",
        "",
        "Options:",
        "  --out-dir DIR          Output directory (default: .).",
        "  --test-fraction F      Held-out fraction, split by text hash (default: 0.2).",
        "  --ngram-max N          Largest word n-gram (default: 2).",
        "  --min-df N             Minimum document frequency (default: 1).",
        "  --max-features N       Vocabulary cap, 0 for none (default: 20000).",
        "  --no-idf               Plain term counts instead of TF-IDF.",
        "  --sublinear-tf         Use 1 + ln(tf).",
        "  --no-norm              Skip L2 normalization.",
        "  --epochs N             Training epochs (default: 30).",
        "  --learning-rate F      Learning rate (default: 0.5).",
        "  --l2 F                 L2 penalty (default: 1e-4).",
        "  --batch-size N         Mini-batch size (default: 32).",
        "  --seed N               Shuffle seed (default: 42).",
        "  --no-balance           Disable class-balanced loss weights.",
        "  --temperature F        Softmax temperature stored in the model (default: 1.0).",
    ]
    .join("\n")
}
