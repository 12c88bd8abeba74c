use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "benchgen")]
#[command(about = "Go benchmark harness generator and signature type checker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to .benchgen.toml in this or a parent directory)
    #[arg(short = 'c', long = "config", global = true, env = "BENCHGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan numbered benchmark folders for signatures with non-basic types
    Scan {
        /// Directory holding numbered benchmark folders
        base_dir: PathBuf,

        /// Output file (markdown defaults to the configured report file, others to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,

        /// Instruction file name inside each folder
        #[arg(long = "instruction-file")]
        instruction_file: Option<String>,
    },

    /// Classify the parameter and result types of one Go signature
    Classify {
        /// Signature source; read from --file or stdin when absent
        signature: Option<String>,

        /// Read the signature source from a file
        #[arg(long, conflicts_with = "signature")]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate runner_test.go, tested.go and compare.go for a benchmark folder
    Generate {
        /// Benchmark folder containing the instruction file
        bench_dir: PathBuf,

        /// Test-case file (defaults to the configured path inside BENCH_DIR)
        #[arg(long = "test-cases")]
        test_cases: Option<PathBuf>,

        /// Directory for generated files (defaults to BENCH_DIR)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Structurally compare two JSON documents
    Compare {
        /// JSON file with the expected value
        expected: PathBuf,

        /// JSON file with the actual value
        actual: PathBuf,

        /// Float tolerance (defaults to the configured float tolerance)
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Summarise `go test -v` output
    Results {
        /// Captured output; stdin when absent
        file: Option<PathBuf>,

        /// Expected number of tests
        #[arg(long)]
        total: Option<usize>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a .benchgen.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}
