//! regctl -- read and write FPGA fabric registers by name.
//!
//! This binary is the command-line front end to `regctl-core`. It performs:
//! 1. **Write:** Encode a decimal value and store it in the named register.
//! 2. **Read:** Load the named register and print it as a decimal value.
//! 3. **List:** Print the configured register names without touching the device.
//!
//! The register map is the built-in default unless `--config` names a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use regctl_core::access::{self, AccessOptions, ReadbackMode};
use regctl_core::fixed::FractionRendering;
#[cfg(unix)]
use regctl_core::mmio::DevMem;
use regctl_core::{Config, Error, RegisterTable};

#[cfg(not(unix))]
compile_error!("regctl maps registers through /dev/mem and only builds on Unix targets");

#[derive(Parser, Debug)]
#[command(
    name = "regctl",
    author,
    version,
    about = "regctl -- read and write fpga fabric registers by name",
    long_about = "Read and write registers of a custom FPGA component by name, as fixed-point decimal values.\n\nRegisters are mapped from /dev/mem, so reads and writes normally need root.\n\nExamples:\n  regctl write left_gain -1.5\n  regctl -r write right_gain 0.25\n  regctl read left_gain\n  regctl --list-registers"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Produce verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read back values after writing.
    #[arg(short, long, global = true)]
    readback: bool,

    /// Where readback values come from.
    #[arg(long, value_enum, default_value_t = ReadbackSource::Codec, global = true)]
    readback_source: ReadbackSource,

    /// List available register names.
    #[arg(short, long, global = true)]
    list_registers: bool,

    /// JSON register map (defaults to the built-in layout).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Digits printed after the decimal point, 0 to 255 (overrides the register map).
    #[arg(long, global = true)]
    decimals: Option<u8>,

    /// Render every fraction bit instead of dropping the least-significant one.
    #[arg(long, global = true)]
    exact_fraction: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a decimal value to a register.
    Write {
        /// Register name.
        register: String,

        /// Decimal value, e.g. -1.5.
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Read a register and print its decimal value.
    Read {
        /// Register name.
        register: String,
    },
}

impl Commands {
    fn register(&self) -> &str {
        match self {
            Self::Write { register, .. } | Self::Read { register } => register,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReadbackSource {
    /// Decode the word that was written.
    Codec,
    /// Re-read the register from the device.
    Memory,
}

impl From<ReadbackSource> for ReadbackMode {
    fn from(source: ReadbackSource) -> Self {
        match source {
            ReadbackSource::Codec => Self::Codec,
            ReadbackSource::Memory => Self::Memory,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Loads the register map and carries out the requested command.
///
/// The device is opened only after the register name resolves, and the mapping is released
/// on every return path: explicitly on success, by drop on error.
fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let table = config.register_table()?;

    if cli.list_registers {
        print!("{}", register_list(&table));
        return Ok(());
    }

    let Some(command) = &cli.command else {
        Cli::command()
            .error(
                ErrorKind::MissingSubcommand,
                "command must be either read or write",
            )
            .exit();
    };

    let reg = table.resolve(command.register())?;
    let options = access_options(cli, &config);

    let device = DevMem::open(&config.component.device)?;
    let mut region = device.map(config.base_addr(), config.component.span)?;

    match command {
        Commands::Write { value, .. } => {
            let report = access::write(&mut region, reg, value, &options)?;
            if let Some(back) = report.readback {
                println!("Readback: {} = {}", reg.name, back.text);
            }
        }
        Commands::Read { .. } => {
            let reading = access::read(&region, reg, &options)?;
            println!("{}", reading.text);
        }
    }

    region.unmap()
}

/// Combines the register map's display settings with command-line overrides.
fn access_options(cli: &Cli, config: &Config) -> AccessOptions {
    let mut options = AccessOptions::from_display(&config.display);
    if let Some(decimals) = cli.decimals {
        options.num_decimals = decimals;
    }
    if cli.exact_fraction {
        options.rendering = FractionRendering::Exact;
    }
    if cli.readback {
        options.readback = Some(cli.readback_source.into());
    }
    options
}

/// Formats the `Available registers:` listing.
fn register_list(table: &RegisterTable) -> String {
    let mut out = String::from("Available registers:\n");
    for name in table.names() {
        out.push('\t');
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Prints an error and, where they apply, the OS error number and the valid register names.
fn report(err: &Error) {
    eprintln!("ERROR: {err}");
    if let Some(code) = err.raw_os_error() {
        eprintln!("ERRNO: {code}");
    }
    if let Error::UnknownRegister { available, .. } = err {
        eprintln!("Available registers:");
        for name in available {
            eprintln!("\t{name}");
        }
    }
}

/// Installs a stderr log subscriber: DEBUG with `--verbose`, WARN otherwise; `RUST_LOG` wins.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("couldn't install log subscriber: {err}");
    }
}
