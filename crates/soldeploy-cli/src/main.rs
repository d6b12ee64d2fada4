use clap::{Parser, Subcommand};
use colored::Colorize;
use soldeploy_core::compiler::{compile_source, CompileResponse, Solc};
use soldeploy_core::{parse_constructor_args, samples, ChainParams, DeploymentPlan, Error};
use soldeploy_server::{run_server, ServerConfig};
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// soldeploy: compile Solidity and prepare contract deployments
///
/// Parse constructor arguments, compile sources, plan deployments, and
/// run the editor's compile service.
#[derive(Parser)]
#[command(name = "soldeploy", version, about, long_about = None)]
struct Cli {
    /// Suppress non-JSON output
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a constructor argument string into typed values
    Args {
        /// Comma-separated arguments, e.g. "'My Token', 'MTK', 1000"
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a Solidity file and print its ABI
    Compile {
        /// Path to .sol file
        file: PathBuf,
        /// solc executable
        #[arg(long, env = "SOLC", default_value = "solc")]
        solc: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a file and print the deployment the wallet would be asked to send
    Plan {
        /// Path to .sol file
        file: PathBuf,
        /// Constructor arguments
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        args: String,
        /// Manual gas limit; takes precedence over --estimate
        #[arg(long, default_value = "")]
        gas_limit: String,
        /// Raw gas estimate to buffer when no manual limit is given
        #[arg(long)]
        estimate: Option<u64>,
        /// solc executable
        #[arg(long, env = "SOLC", default_value = "solc")]
        solc: PathBuf,
    },

    /// Write the bundled example contracts into a directory
    Examples {
        /// Target directory (created if missing)
        dir: PathBuf,
    },

    /// Run the HTTP compile service
    Serve {
        /// Listen host
        #[arg(long, env = "SOLDEPLOY_BIND", default_value = "127.0.0.1")]
        bind: String,
        /// Listen port
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
        /// solc executable
        #[arg(long, env = "SOLC", default_value = "solc")]
        solc: PathBuf,
        /// Directory holding the editor front-end
        #[arg(long, env = "SOLDEPLOY_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    let default_level = match cli.command {
        Commands::Serve { .. } => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };
    init_tracing(default_level);

    let exit_code = match cli.command {
        Commands::Args { text, json } => cmd_args(&text, json, quiet),
        Commands::Compile { file, solc, json } => cmd_compile(&file, &solc, json, quiet),
        Commands::Plan {
            file,
            args,
            gas_limit,
            estimate,
            solc,
        } => cmd_plan(&file, &args, &gas_limit, estimate, &solc),
        Commands::Examples { dir } => cmd_examples(&dir, quiet),
        Commands::Serve {
            bind,
            port,
            solc,
            static_dir,
        } => cmd_serve(ServerConfig {
            bind,
            port,
            solc,
            static_dir,
        }),
        Commands::Version => {
            println!(
                "soldeploy {} (soldeploy-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_tracing(default_level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_args(text: &str, json: bool, quiet: bool) -> i32 {
    let args = parse_constructor_args(text);

    if json {
        return print_json(&args);
    }
    if quiet {
        return EXIT_OK;
    }

    if args.is_empty() {
        println!("{}", "no constructor arguments".dimmed());
    }
    for (i, arg) in args.iter().enumerate() {
        println!("  [{}] {:<7} {}", i, arg.type_name(), arg);
    }
    EXIT_OK
}

fn cmd_compile(file: &Path, solc: &Path, json: bool, quiet: bool) -> i32 {
    let Some(source) = read_source(file) else {
        return EXIT_ERROR;
    };

    let result = compile_source(&Solc::new(solc), &source);
    let exit_code = match &result {
        Ok(_) => EXIT_OK,
        Err(e) if e.is_source_error() => EXIT_FAILURE,
        Err(_) => EXIT_ERROR,
    };

    if json {
        print_json(&CompileResponse::from_result(result));
        return exit_code;
    }

    match result {
        Ok(contract) => {
            if !quiet {
                println!("{} {}", "✓ Compilation successful:".green(), contract.name);
                println!("{}", "Contract ABI:".bold());
                println!(
                    "{}",
                    serde_json::to_string_pretty(&contract.abi).unwrap_or_default()
                );
            }
        }
        Err(e) => {
            eprintln!("{}", "✗ Compilation failed".red());
            eprintln!("{}", e);
        }
    }
    exit_code
}

fn cmd_plan(
    file: &Path,
    args: &str,
    gas_limit: &str,
    estimate: Option<u64>,
    solc: &Path,
) -> i32 {
    let Some(source) = read_source(file) else {
        return EXIT_ERROR;
    };

    let compiled = match compile_source(&Solc::new(solc), &source) {
        Ok(contract) => Some(contract),
        Err(e) if e.is_source_error() => {
            eprintln!("{} {}", "✗ Compilation failed:".red(), e);
            return EXIT_FAILURE;
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            return EXIT_ERROR;
        }
    };

    let plan = DeploymentPlan::build(
        compiled.as_ref(),
        ChainParams::bsc_mainnet(),
        args,
        gas_limit,
        |_| estimate.ok_or_else(|| "no estimate available (pass --estimate or --gas-limit)".to_string()),
    );

    match plan {
        Ok(plan) => print_json(&plan),
        Err(e @ (Error::GasEstimation(_) | Error::MissingPrerequisite(_))) => {
            eprintln!("{} {}", "⚠".yellow(), e);
            EXIT_FAILURE
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            EXIT_ERROR
        }
    }
}

fn cmd_examples(dir: &Path, quiet: bool) -> i32 {
    match samples::write_all(dir) {
        Ok(paths) => {
            if !quiet {
                for path in paths {
                    println!("Created example: {}", path.display());
                }
            }
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{} cannot write examples to {}: {}", "error:".red(), dir.display(), e);
            EXIT_ERROR
        }
    }
}

fn cmd_serve(config: ServerConfig) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{} cannot start runtime: {}", "error:".red(), e);
            return EXIT_ERROR;
        }
    };

    match runtime.block_on(run_server(config)) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red(), e);
            EXIT_ERROR
        }
    }
}

// ── Helpers ───────────────────────────────────────────────

fn read_source(file: &Path) -> Option<String> {
    match std::fs::read_to_string(file) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("{} cannot read {}: {}", "error:".red(), file.display(), e);
            None
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{} cannot serialize output: {}", "error:".red(), e);
            EXIT_ERROR
        }
    }
}
