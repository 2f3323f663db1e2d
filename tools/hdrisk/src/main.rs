use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hdrisk_encode::{Encoder, RawSelection, SchemeId};
use hdrisk_model::ModelBundle;
use hdrisk_predict::{
    compose_report, FallbackSchema, Pipeline, PipelineConfig, SchemaPreset, CONFIG_FILE,
};
use log::LevelFilter;

mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "hdrisk",
    version,
    about = "Heart-disease risk prediction from survey answers",
    long_about = "hdrisk encodes survey answers, aligns them with a trained model's\n\
        expected feature columns, and reports the predicted risk.\n\n\
        EXAMPLES:\n\
        \n  hdrisk predict --model rf.json answers.json       Predict from a JSON answer file\n\
        \n  hdrisk predict --threshold 0.35 < answers.json     Use a tuned decision threshold\n\
        \n  hdrisk encode --scheme one-hot-suffix answers.json Show encoded columns\n\
        \n  hdrisk schema --model rf.json                      Show the columns a model expects"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict heart-disease risk for one set of answers
    Predict(PredictArgs),
    /// Encode answers into feature columns without predicting
    Encode(EncodeArgs),
    /// Print the feature columns and capabilities of a model
    Schema(ModelArgs),
}

#[derive(Debug, Args, Clone, Default)]
struct ModelArgs {
    /// Configuration file (defaults to ./hdrisk.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model artifact (JSON)
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Scaler artifact (JSON)
    #[arg(long, value_name = "FILE")]
    scaler: Option<PathBuf>,

    /// Use the 13-column 2020 metric schema when the model has no feature names
    #[arg(long)]
    metric_fallback: bool,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    #[command(flatten)]
    model: ModelArgs,

    /// Decision threshold for the positive class (defaults to the classifier's own)
    #[arg(long, value_name = "P")]
    threshold: Option<f64>,

    /// Answers as a JSON object (reads stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    format: OutputMode,
}

#[derive(Debug, Args, Clone)]
struct EncodeArgs {
    /// Encoding scheme (one-hot-suffix, single-column, ordinal-diabetic)
    #[arg(long)]
    scheme: SchemeId,

    /// Answers as a JSON object (reads stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn read_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn parse_selection(text: &str) -> Result<RawSelection, String> {
    serde_json::from_str::<RawSelection>(text)
        .map(|selection| selection.clamped())
        .map_err(|e| format!("invalid answers: {e}"))
}

fn resolve_config(args: &ModelArgs, threshold: Option<f64>) -> Result<PipelineConfig, String> {
    let file = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(PathBuf::from(CONFIG_FILE)).filter(|p| p.is_file()),
    };
    let base = match file {
        Some(path) => PipelineConfig::load(&path).map_err(|e| e.to_string())?,
        None => PipelineConfig::default(),
    };
    Ok(base.merge(PipelineConfig {
        model: args.model.clone(),
        scaler: args.scaler.clone(),
        threshold,
        fallback_schema: args
            .metric_fallback
            .then_some(FallbackSchema::Preset(SchemaPreset::Heart2020Metric)),
    }))
}

fn run_predict(args: &PredictArgs) -> i32 {
    let config = match resolve_config(&args.model, args.threshold) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    // A model that fails to load means no request is accepted at all.
    let pipeline = match Pipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let selection = match read_input(&args.input).and_then(|text| parse_selection(&text)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    match pipeline.run(&selection) {
        Ok(assessment) => {
            let report = compose_report(&assessment.result);
            let importance = pipeline.feature_importance();
            match args.format {
                OutputMode::Text => print!(
                    "{}",
                    render::assessment_text(&assessment, &report, importance.as_deref())
                ),
                OutputMode::Json => {
                    let out = serde_json::json!({
                        "model": pipeline.bundle().name(),
                        "assessment": assessment,
                        "report": report,
                        "feature_importance": importance,
                    });
                    println!("{out:#}");
                }
            }
            0
        }
        Err(e) => {
            eprintln!("error: prediction failed: {e}");
            1
        }
    }
}

fn run_encode(args: &EncodeArgs) -> i32 {
    let selection = match read_input(&args.input).and_then(|text| parse_selection(&text)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let encoded = Encoder::new(args.scheme).encode(&selection);
    match serde_json::to_string_pretty(&encoded) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn load_bundle(args: &ModelArgs) -> Result<ModelBundle, String> {
    let config = resolve_config(args, None)?;
    let model = config
        .model
        .as_deref()
        .ok_or_else(|| "no model artifact configured".to_string())?;
    let fallback = config.fallback();
    ModelBundle::load(model, config.scaler.as_deref(), fallback.as_ref())
        .map_err(|e| e.to_string())
}

fn run_schema(args: &ModelArgs) -> i32 {
    match load_bundle(args) {
        Ok(bundle) => {
            print!("{}", render::schema_text(&bundle));
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn run(cli: Cli) -> i32 {
    init_logging(cli.verbose);
    match &cli.command {
        Command::Predict(args) => run_predict(args),
        Command::Encode(args) => run_encode(args),
        Command::Schema(args) => run_schema(args),
    }
}

fn main() {
    std::process::exit(run(Cli::parse()));
}
