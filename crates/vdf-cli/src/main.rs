//! `vdf` CLI — convert Steam's binary `shortcuts.vdf` to JSON and back.
//!
//! ## Usage
//!
//! ```sh
//! # Decode any binary VDF to pretty JSON (stdin → stdout)
//! vdf decode < shortcuts.vdf
//!
//! # Decode from file to file, keeping 0/1 as integers
//! vdf decode -i shortcuts.vdf -o shortcuts.json --no-booleans
//!
//! # Encode JSON back to binary VDF
//! vdf encode -i shortcuts.json -o shortcuts.vdf
//!
//! # Back up the current user's shortcuts.vdf and export it as JSON
//! vdf export -d "C:/Program Files (x86)/Steam"
//!
//! # Turn the edited shortcuts.json into shortcuts.json.vdf
//! vdf import
//! ```

mod steam;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vdf_core::DecoderConfig;

#[derive(Parser)]
#[command(
    name = "vdf",
    version,
    about = "Convert Steam shortcuts.vdf files to and from JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode binary VDF to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: DecodeOptions,
    },
    /// Encode JSON to binary VDF
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Copy a Steam user's shortcuts.vdf and write it out as shortcuts.json
    Export {
        /// Steam user ID (auto-detected when there is exactly one)
        #[arg(short = 'u', long)]
        steam_user_id: Option<String>,
        /// Steam install directory
        #[arg(short = 'd', long, default_value = steam::DEFAULT_STEAM_DIR)]
        steam_directory: PathBuf,
        /// Directory receiving shortcuts.vdf and shortcuts.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        options: DecodeOptions,
    },
    /// Convert an edited shortcuts.json back to binary VDF
    Import {
        /// JSON file to read
        #[arg(short, long, default_value = "shortcuts.json")]
        input: PathBuf,
        /// VDF file to write (defaults to the input name plus ".vdf")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Decoder coercion flags shared by `decode` and `export`.
#[derive(Args)]
struct DecodeOptions {
    /// JSON file with a decoder configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Integer property decoded as a timestamp (repeatable; replaces the defaults)
    #[arg(long = "date-property", value_name = "NAME")]
    date_properties: Vec<String>,
    /// Keep 0/1 integers as numbers
    #[arg(long)]
    no_booleans: bool,
    /// Keep objects with numeric keys as objects
    #[arg(long)]
    no_arrays: bool,
}

impl DecodeOptions {
    fn to_config(&self) -> Result<DecoderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid decoder config: {}", path.display()))?
            }
            None => DecoderConfig::default(),
        };
        if !self.date_properties.is_empty() {
            config = config.with_date_properties(self.date_properties.iter().cloned());
        }
        if self.no_booleans {
            config = config.convert_booleans(false);
        }
        if self.no_arrays {
            config = config.convert_arrays(false);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            output,
            options,
        } => {
            let config = options.to_config()?;
            let bytes = read_input(input.as_deref())?;
            let json =
                vdf_core::vdf_to_json(&bytes, &config).context("Failed to decode VDF to JSON")?;
            write_output(output.as_deref(), json.as_bytes())?;
        }
        Commands::Encode { input, output } => {
            let bytes = read_input(input.as_deref())?;
            let json = String::from_utf8(bytes).context("JSON input is not valid UTF-8")?;
            let vdf = vdf_core::json_to_vdf(&json).context("Failed to encode JSON to VDF")?;
            write_output(output.as_deref(), &vdf)?;
        }
        Commands::Export {
            steam_user_id,
            steam_directory,
            out_dir,
            options,
        } => {
            let config = options.to_config()?;
            export(&steam_directory, steam_user_id, &out_dir, &config)?;
        }
        Commands::Import { input, output } => {
            let output = output.unwrap_or_else(|| steam::append_extension(&input, "vdf"));
            import(&input, &output)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn export(
    steam_dir: &Path,
    user_id: Option<String>,
    out_dir: &Path,
    config: &DecoderConfig,
) -> Result<()> {
    let user_id = steam::resolve_user_id(steam_dir, user_id)?;
    let vdf_path = steam::shortcuts_path(steam_dir, &user_id);

    let vdf_copy_path = out_dir.join("shortcuts.vdf");
    info!(
        "Copying VDF at '{}' to '{}'",
        vdf_path.display(),
        vdf_copy_path.display()
    );
    std::fs::copy(&vdf_path, &vdf_copy_path).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            vdf_path.display(),
            vdf_copy_path.display()
        )
    })?;

    info!("Converting VDF to JSON...");
    let bytes = std::fs::read(&vdf_path)
        .with_context(|| format!("Failed to read file: {}", vdf_path.display()))?;
    let json = vdf_core::vdf_to_json(&bytes, config).context("Failed to decode VDF to JSON")?;

    let json_path = vdf_copy_path.with_extension("json");
    info!("Writing JSON to '{}'", json_path.display());
    std::fs::write(&json_path, json)
        .with_context(|| format!("Failed to write file: {}", json_path.display()))?;
    Ok(())
}

fn import(json_path: &Path, vdf_path: &Path) -> Result<()> {
    info!("Loading JSON at '{}'", json_path.display());
    let json = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read file: {}", json_path.display()))?;
    let bytes = vdf_core::json_to_vdf(&json).context("Failed to encode JSON to VDF")?;

    info!("Writing VDF to '{}'", vdf_path.display());
    std::fs::write(vdf_path, bytes)
        .with_context(|| format!("Failed to write file: {}", vdf_path.display()))?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
