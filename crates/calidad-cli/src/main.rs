mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "calidad",
    version,
    about = "Compliance narratives for environmental monitoring data"
)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a monitoring workbook and print the merged dataset
    Parse {
        /// Path to an xlsx workbook with 'datos' and 'eca'/'lmp' sheets
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the merged dataset to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Report module; groundwater adds the lim_referencia_gw column
        #[arg(short, long)]
        module: Option<String>,
    },
    /// List the regulatory standards found in a workbook
    Standards {
        /// Path to an xlsx workbook or a saved JSON dataset
        input_file: PathBuf,

        /// Mark the standards preselected for this module
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Generate compliance narratives
    Report {
        /// Path to an xlsx workbook or a saved JSON dataset
        input_file: PathBuf,

        /// Module: surface, groundwater, effluents, sediments
        #[arg(short, long)]
        module: String,

        /// Parameter(s) to describe (default: all)
        #[arg(short, long = "parameter", value_name = "NAME")]
        parameter: Vec<String>,

        /// Standard(s) to compare against, by label or id (default: module preselection)
        #[arg(short, long = "standard", value_name = "LABEL")]
        standard: Vec<String>,

        /// Report configuration JSON file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Custom standard catalog JSON file
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Groundwater: also compare against mean - 2·s
        #[arg(long)]
        low_reference: bool,

        /// Groundwater: skip the mean + 2·s comparison
        #[arg(long)]
        no_high_reference: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the builtin surface water standard catalog
    Catalog,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
            module,
        } => commands::parse::run(input_file, &output, out, module.as_deref()),
        Commands::Standards { input_file, module } => {
            commands::standards::run(input_file, module.as_deref())
        }
        Commands::Report {
            input_file,
            module,
            parameter,
            standard,
            config,
            catalog,
            low_reference,
            no_high_reference,
            output,
        } => commands::report::run(commands::report::ReportArgs {
            input_file,
            module,
            parameters: parameter,
            standards: standard,
            config,
            catalog,
            low_reference,
            no_high_reference,
            output_format: output,
        }),
        Commands::Catalog => commands::catalog::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
