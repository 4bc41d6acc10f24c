use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use plantdx_cli::{
    DEFAULT_HISTORY_FILE, Diagnoser, DiagnosisHistory, DiagnosisSession, PRODUCT_CATALOG,
    ReportBuilder, display_badges, display_banner, display_diagnosis, display_history,
    display_products, recommend_products,
};
use plantdx_core::{NON_PLANT_INDICATORS, ResponseNormalizer};
use plantdx_openrouter::OpenRouterClient;

#[derive(Parser)]
#[command(name = "plantdx")]
#[command(about = "AI-powered plant disease diagnosis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a plant image
    Diagnose {
        /// Image file (jpg, png, webp, ...)
        image: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Save the diagnosis to history
        #[arg(long)]
        save: bool,

        /// Export a printable report into this directory
        #[arg(long, value_name = "DIR")]
        report: Option<PathBuf>,

        /// Show product recommendations
        #[arg(long)]
        products: bool,

        /// Override the vision model
        #[arg(long)]
        model: Option<String>,

        /// Extra phrase that marks an unparsable reply as not a plant
        #[arg(long = "not-plant-phrase", value_name = "PHRASE")]
        not_plant_phrases: Vec<String>,
    },

    /// Normalize a raw model reply from a file or stdin
    Normalize {
        file: Option<PathBuf>,

        /// Extra phrase that marks an unparsable reply as not a plant
        #[arg(long = "not-plant-phrase", value_name = "PHRASE")]
        not_plant_phrases: Vec<String>,
    },

    /// List saved diagnoses
    History {
        #[arg(long)]
        json: bool,
    },

    /// List the product catalog
    Products {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diagnose {
            image,
            json,
            save,
            report,
            products,
            model,
            not_plant_phrases,
        } => {
            let options = DiagnoseOptions {
                json,
                save,
                report,
                products,
            };
            diagnose(&image, model, &not_plant_phrases, options).await?;
        }
        Commands::Normalize {
            file,
            not_plant_phrases,
        } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let result = normalizer(&not_plant_phrases).normalize(&raw);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::History { json } => {
            let history = DiagnosisHistory::new(history_path());
            if json {
                println!("{}", serde_json::to_string_pretty(history.entries())?);
            } else {
                display_history(history.entries());
            }
        }
        Commands::Products { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(PRODUCT_CATALOG)?);
            } else {
                display_products(PRODUCT_CATALOG);
            }
        }
    }

    Ok(())
}

struct DiagnoseOptions {
    json: bool,
    save: bool,
    report: Option<PathBuf>,
    products: bool,
}

async fn diagnose(
    image: &Path,
    model: Option<String>,
    not_plant_phrases: &[String],
    options: DiagnoseOptions,
) -> Result<()> {
    let mut client = OpenRouterClient::from_env()?;
    if let Some(model) = model {
        client = client.with_model(model);
    }

    let diagnoser = Diagnoser::new(client).with_normalizer(normalizer(not_plant_phrases));
    let mut session = DiagnosisSession::new(DiagnosisHistory::new(history_path()));

    let label = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.display().to_string());

    if !options.json {
        display_banner(diagnoser.model_id());
        println!("{} Analyzing {}...", "🔬".blue(), label);
    }

    let token = session.begin_analysis(label.clone());
    let result = diagnoser.diagnose_path(image).await;
    session.complete_analysis(token, result.clone());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_diagnosis(&result);
        display_badges(session.badges());
    }

    if options.save {
        match session.save_current().await {
            Ok(saved) => println!("{} Saved diagnosis {}", "✅".green(), saved.id),
            Err(e) => println!("{} Not saved: {}", "⚠️".yellow(), e),
        }
    }

    if let Some(dir) = options.report {
        match ReportBuilder::default().build(&result, Some(label.as_str()), Local::now()) {
            Ok(report) => {
                let path = report.write_to_dir(&dir).await?;
                println!("{} Report written to {}", "📄".blue(), path.display());
            }
            Err(e) => println!("{} No report: {}", "⚠️".yellow(), e),
        }
    }

    if options.products && !options.json {
        display_products(recommend_products(&result));
    }

    Ok(())
}

fn normalizer(extra_phrases: &[String]) -> ResponseNormalizer {
    ResponseNormalizer::with_indicators(
        NON_PLANT_INDICATORS
            .iter()
            .map(|phrase| phrase.to_string())
            .chain(extra_phrases.iter().cloned()),
    )
}

fn history_path() -> PathBuf {
    std::env::var("PLANTDX_HISTORY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_HISTORY_FILE))
}
