use clap::{Parser, Subcommand};
use deployment_probe::{ProbeConfig, ProbeRunner, ValidationSuite};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "probectl")]
#[command(about = "Deployment probe for the remote execution platform", long_about = None)]
struct Cli {
    /// Path to the probe configuration file
    #[arg(short, long, default_value = "probe.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the probe entrypoint once (manual run)
    Run,

    /// Preflight only: credentials present and platform client buildable
    Check,

    /// Run the full validation suite and save the results
    Validate {
        /// Where to write the validation summary
        #[arg(short, long, default_value = "validation_results.json")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so the credential variables are visible to the platform client.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();

    // Load or create default configuration
    let config = if cli.config.exists() {
        ProbeConfig::from_file(&cli.config)?
    } else {
        tracing::warn!("Config file not found, using default configuration");
        let default_config = ProbeConfig::default();
        default_config.save_to_file(&cli.config)?;
        default_config
    };

    match cli.command {
        Commands::Run => {
            let mut runner = ProbeRunner::from_config(config)?;
            let report = runner.run().await?;
            println!("{}", serde_json::to_string(&report)?);
            println!("Done!");
        }
        Commands::Check => {
            let remote = config.is_remote();
            let _runner = ProbeRunner::from_config(config)?;
            if remote {
                println!("✓ Credentials present, remote platform client ready");
            } else {
                println!("✓ Credentials present, local execution mode");
            }
        }
        Commands::Validate { output } => {
            let mut validator = ValidationSuite::new(config);
            let summary = validator.run_full_validation().await?;

            validator.print_summary();
            validator.save_results(&output)?;

            if summary.failed > 0 {
                anyhow::bail!("{} validation checks failed", summary.failed);
            }
        }
    }

    Ok(())
}
