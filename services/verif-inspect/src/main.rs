//! Verification input inspector.
//!
//! Loads one file through the format dispatcher and prints the detected
//! format, the variable, the axes and any data-quality warnings.

mod config;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use verif_input::{get_input_with_config, Format};

#[derive(Parser, Debug)]
#[command(name = "verif-inspect")]
#[command(about = "Load a verification input file and summarize its contents")]
struct Args {
    /// Input file (verif NetCDF, COMPS NetCDF or text)
    #[arg(required_unless_present = "list_formats")]
    path: Option<String>,

    /// YAML file with load settings (missing_value, lat_lon_tolerance, elev_tolerance)
    #[arg(short, long, env = "VERIF_CONFIG")]
    config: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// List supported formats in detection order and exit
    #[arg(long)]
    list_formats: bool,

    /// How many entries of each axis to print
    #[arg(long, default_value_t = 5)]
    preview: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    if args.list_formats {
        for format in Format::PRIORITY {
            println!("{:<8} {}", format.name(), format.description());
        }
        return Ok(());
    }

    let path = args.path.context("No input file given")?;
    let load_config = config::resolve(args.config.as_deref())?;
    info!(?load_config, "Resolved load configuration");

    verif_input::silence_hdf5_errors();
    let input = get_input_with_config(&path, &load_config)
        .with_context(|| format!("Failed to load '{}'", path))?;

    print!("{}", summary::render(&input, args.preview));
    Ok(())
}
