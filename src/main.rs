use anyhow::Result;
use benchgen::cli::{Cli, Commands};
use benchgen::commands::{self, GenerateConfig, ScanConfig};
use benchgen::config::resolve_config;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let settings = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            base_dir,
            output,
            format,
            instruction_file,
        } => commands::scan_benchmarks(
            ScanConfig {
                base_dir,
                output,
                format,
                instruction_file,
            },
            &settings,
        ),
        Commands::Classify {
            signature,
            file,
            json,
        } => commands::classify_source(signature, file, json),
        Commands::Generate {
            bench_dir,
            test_cases,
            out,
            force,
        } => {
            let written = commands::generate_harness_files(
                GenerateConfig {
                    bench_dir,
                    test_cases,
                    out,
                    force,
                },
                &settings,
            )?;
            for path in written {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Compare {
            expected,
            actual,
            tolerance,
        } => commands::compare_files(&expected, &actual, tolerance, &settings),
        Commands::Results { file, total, json } => {
            commands::summarize_results(file.as_deref(), total, json)
        }
        Commands::Init { force } => commands::init_config(force),
    }
}
