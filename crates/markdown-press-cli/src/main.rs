mod encoding;

use anyhow::{Context, Result, bail};
use clap::Parser;
use markdown_press_config::Config;
use markdown_press_engine::{OutputMode, build_from_file, io};
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use encoding::OutputEncoding;

#[derive(Parser, Debug)]
#[command(name = "markdown-press")]
#[command(about = "Convert a Markdown file to HTML")]
#[command(version)]
struct Cli {
    /// Markdown input file (.md / .markdown)
    input: PathBuf,

    /// Output HTML file path (defaults to same name with .html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output only the HTML body (no <html>/<head> wrapper)
    #[arg(long, conflicts_with = "full")]
    body: bool,

    /// Output a complete HTML page (default)
    #[arg(long)]
    full: bool,

    /// Overwrite output file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Encoding used to write the output file [default: utf-8]
    #[arg(long)]
    output_encoding: Option<String>,

    /// Config file to read defaults from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log conversion details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What a successful run wrote.
#[derive(Debug)]
struct Saved {
    mode: OutputMode,
    output: PathBuf,
}

impl Cli {
    fn mode(&self, config: &Config) -> OutputMode {
        if self.body {
            OutputMode::Body
        } else if self.full {
            OutputMode::Full
        } else {
            config.mode
        }
    }

    fn output_path(&self, config: &Config) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let inferred = io::infer_output_path(&self.input);
        match (&config.output_dir, inferred.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => inferred,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            Config::load_from_path(path)?
        }
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

/// Checks the input before the config so a broken config file never hides a
/// missing input.
fn execute(cli: &Cli) -> Result<Saved> {
    if !cli.input.is_file() {
        bail!("input file not found: {}", cli.input.display());
    }
    let config = load_config(cli.config.as_deref())?;
    run(cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<Saved> {
    let input = &cli.input;
    let output = cli.output_path(config);
    if output.exists() && !(cli.force || config.force) {
        bail!(
            "output file already exists: {} (use --force to overwrite)",
            output.display()
        );
    }

    let mode = cli.mode(config);
    log::info!("converting {} to {} ({mode})", input.display(), output.display());
    let html = build_from_file(input, mode)
        .with_context(|| format!("failed to convert '{}'", input.display()))?;

    let encoding_name = cli
        .output_encoding
        .as_deref()
        .unwrap_or(&config.output_encoding);
    write_output(&output, &html, encoding_name)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    Ok(Saved { mode, output })
}

fn write_output(output: &Path, html: &str, encoding_name: &str) -> Result<()> {
    let encoding: OutputEncoding = encoding_name.parse()?;
    let bytes = encoding.encode(html)?;
    log::debug!("writing {} bytes as {}", bytes.len(), encoding.name());
    io::write_file(output, &bytes)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(saved) => {
            println!("OK: saved {} HTML to {}", saved.mode, saved.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
