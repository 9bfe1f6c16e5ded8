//! Point d'entrée CLI pour coordconv

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Convertir des coordonnées entre lat/lon, UTM et MGRS
#[derive(Parser)]
#[command(name = "coordconv")]
#[command(author, version)]
#[command(about = "Convertir des coordonnées entre lat/lon (WGS84), UTM et MGRS")]
#[command(long_about = "Conversion de coordonnées lat/lon ⇄ UTM ⇄ MGRS sur l'ellipsoïde WGS84.\n\nUn point à la fois (to-utm, to-mgrs, from-utm, from-mgrs) ou un fichier complet en parallèle (batch).")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::ToUtm(point) => cli::cmd_to_utm(point.lat, point.lon)?,
        Commands::ToMgrs(point) => cli::cmd_to_mgrs(point.lat, point.lon)?,
        Commands::FromUtm { utm } => cli::cmd_from_utm(&utm)?,
        Commands::FromMgrs { mgrs } => cli::cmd_from_mgrs(&mgrs)?,
        Commands::Batch {
            input,
            output,
            config,
            format,
            jobs,
            report,
        } => {
            info!(input = %input.display(), output = %output.display(), config = %config, "Conversion par lot");
            cli::cmd_batch(&input, &output, &config, format, jobs, report.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
