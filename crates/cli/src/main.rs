use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use healthai_core::{
    analyse, plan_for, respond, views, AnalysisRequest, Catalogue, CoreConfig, Delays,
    DetectionMode, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod shell;

#[derive(Parser)]
#[command(name = "healthai")]
#[command(about = "HealthAI assistant CLI")]
struct Cli {
    /// Catalogue YAML file to use instead of the embedded one
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Symptom detection mode: substring or word
    #[arg(long, global = true)]
    detection: Option<DetectionMode>,

    /// Skip the simulated delays
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the daily tip and summary cards
    Dashboard,
    /// List the symptom checklist
    Symptoms,
    /// List known conditions
    Conditions,
    /// Analyse symptoms and rank matching conditions
    Analyse {
        /// Free-text description of symptoms
        #[arg(long, default_value = "")]
        text: String,
        /// Checklist symptom (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Send one message to the assistant
    Chat {
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Show the treatment plan for a condition
    Treatment {
        #[arg(required = true)]
        condition: Vec<String>,
    },
    /// List upcoming appointments
    Appointments,
    /// List current medications
    Medications,
    /// Show the analytics charts
    Analytics,
    /// Inspect catalogue files
    Catalogue {
        #[command(subcommand)]
        action: CatalogueCommands,
    },
    /// Start an interactive session
    Shell,
}

#[derive(Subcommand)]
enum CatalogueCommands {
    /// Validate a catalogue YAML file
    Check { path: PathBuf },
    /// Print the embedded catalogue
    Dump,
}

/// Environment first, then command-line flags on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<CoreConfig> {
    let from_env = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;

    let detection = cli.detection.unwrap_or(from_env.detection());
    let delays = if cli.no_delay {
        Delays::none()
    } else {
        from_env.delays()
    };
    let catalogue_path = cli
        .catalogue
        .clone()
        .or_else(|| from_env.catalogue_path().map(Path::to_path_buf));

    Ok(CoreConfig::new(detection, delays, catalogue_path)?)
}

async fn pause(delay: std::time::Duration, message: &str) {
    if !delay.is_zero() {
        eprintln!("{message}");
        tokio::time::sleep(delay).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthai=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Checking a file must not depend on the configured catalogue being valid.
    if let Some(Commands::Catalogue { action }) = &cli.command {
        match action {
            CatalogueCommands::Check { path } => {
                let catalogue = Catalogue::load(path)?;
                println!(
                    "{} is valid: {} conditions, {} symptoms",
                    path.display(),
                    catalogue.conditions().len(),
                    catalogue.vocabulary().len()
                );
            }
            CatalogueCommands::Dump => print!("{}", catalogue::EMBEDDED_CATALOGUE),
        }
        return Ok(());
    }

    let cfg = resolve_config(&cli)?;
    let catalogue = cfg.load_catalogue()?;

    match cli.command {
        None | Some(Commands::Dashboard) => {
            let session = Session::start(&catalogue, &mut rand::thread_rng());
            let view = views::dashboard(&catalogue, session.daily_tip(), session.theme());
            println!("{}", render::dashboard(&view));
        }
        Some(Commands::Symptoms) => {
            println!("{}", render::checklist(&views::checklist(&catalogue)));
        }
        Some(Commands::Conditions) => {
            println!("{}", render::conditions(catalogue.conditions()));
        }
        Some(Commands::Analyse {
            text,
            symptoms,
            age,
            gender,
            json,
        }) => {
            let mut request = AnalysisRequest::new(text, symptoms);
            request.age = age;
            request.gender = gender;

            let results = analyse(&request, &catalogue, cfg.detection())?;
            pause(cfg.delays().analysis, "Analysing symptoms...").await;

            let outcome = views::prediction_outcome(&results, &catalogue);
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render::prediction_outcome(&outcome));
            }
        }
        Some(Commands::Chat { message }) => {
            let message = message.join(" ");
            match respond(&message, &catalogue, cfg.detection()) {
                Ok(reply) => {
                    pause(cfg.delays().chat, "...").await;
                    println!("{}", render::chat_reply(&reply));
                }
                Err(e) => tracing::debug!("ignoring message: {}", e),
            }
        }
        Some(Commands::Treatment { condition }) => {
            let plan = plan_for(&condition.join(" "), &catalogue)?;
            pause(cfg.delays().treatment, "Generating treatment plan...").await;
            println!("{}", render::treatment(&plan));
        }
        Some(Commands::Appointments) => {
            println!("{}", render::appointments(&views::appointments(&catalogue)));
        }
        Some(Commands::Medications) => {
            println!("{}", render::medications(&views::medications(&catalogue)));
        }
        Some(Commands::Analytics) => {
            println!("{}", render::analytics(&views::analytics(&catalogue)));
        }
        Some(Commands::Shell) => {
            shell::run(cfg, catalogue).await?;
        }
        Some(Commands::Catalogue { .. }) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_symptoms_and_global_flags() {
        let cli = Cli::try_parse_from([
            "healthai",
            "analyse",
            "--symptom",
            "cough",
            "--symptom",
            "fever",
            "--detection",
            "word",
            "--no-delay",
        ])
        .unwrap();

        assert_eq!(cli.detection, Some(DetectionMode::Word));
        assert!(cli.no_delay);
        match cli.command {
            Some(Commands::Analyse { symptoms, text, .. }) => {
                assert_eq!(symptoms, vec!["cough", "fever"]);
                assert!(text.is_empty());
            }
            _ => panic!("expected analyse"),
        }
    }

    #[test]
    fn flags_override_environment_defaults() {
        let cli = Cli::try_parse_from(["healthai", "--no-delay", "dashboard"]).unwrap();
        let cfg = resolve_config(&cli).unwrap();
        assert_eq!(cfg.delays(), Delays::none());
    }

    #[test]
    fn rejects_unknown_detection_mode() {
        assert!(Cli::try_parse_from(["healthai", "--detection", "fuzzy", "symptoms"]).is_err());
    }
}
