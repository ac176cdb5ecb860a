//! docpress CLI - batch office-document conversion
//!
//! Converts office documents (Word, PowerPoint, Excel, OpenDocument, RTF,
//! text, HTML) to PDF or any other format the external tool supports, by
//! driving `LibreOffice` or unoconv per file.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use docpress_backend::{BatchConverter, BatchEvent, FileOutcome, ToolCheck, ToolKind};
use docpress_core::{InputFormat, Scanner};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional input directory used when no input path is given.
const DEFAULT_INPUT_DIR: &str = "data/input";
/// Conventional output directory used when none is configured.
const DEFAULT_OUTPUT_DIR: &str = "data/output";
/// Target format used when none is configured.
const DEFAULT_FORMAT: &str = "pdf";

/// Conversion engine selection for the CLI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// `LibreOffice` in headless mode
    Libreoffice,
    /// The unoconv wrapper
    Unoconv,
}

impl Engine {
    const fn kind(self) -> ToolKind {
        match self {
            Self::Libreoffice => ToolKind::LibreOffice,
            Self::Unoconv => ToolKind::Unoconv,
        }
    }
}

/// Configuration file contents (`.docpress.toml` / `~/.docpress.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Config {
    /// Default settings for the convert command
    convert: Option<ConvertSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConvertSettings {
    /// Default target format
    format: Option<String>,
    /// Default output directory
    output: Option<PathBuf>,
    /// Default conversion engine ("libreoffice" or "unoconv")
    engine: Option<String>,
    /// Explicit conversion binary path
    binary: Option<PathBuf>,
}

impl Config {
    /// Load and merge configuration: CLI args > project config > user config.
    fn load() -> Self {
        Self::merge(Self::load_user_config(), Self::load_project_config())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load user config from ~/.docpress.toml
    fn load_user_config() -> Option<Self> {
        let config_path = dirs::home_dir()?.join(".docpress.toml");
        Self::load_existing(&config_path)
    }

    /// Load project config from ./.docpress.toml
    fn load_project_config() -> Option<Self> {
        Self::load_existing(Path::new(".docpress.toml"))
    }

    fn load_existing(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load config from {}: {e}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Merge configs with precedence: project over user.
    fn merge(user: Option<Self>, project: Option<Self>) -> Self {
        let mut merged = Self::default();

        if let Some(user) = user {
            if let Some(convert) = user.convert {
                merged.convert = Some(convert);
            }
        }

        if let Some(project) = project {
            if let Some(convert) = project.convert {
                let mut settings = merged.convert.unwrap_or_default();
                if let Some(format) = convert.format {
                    settings.format = Some(format);
                }
                if let Some(output) = convert.output {
                    settings.output = Some(output);
                }
                if let Some(engine) = convert.engine {
                    settings.engine = Some(engine);
                }
                if let Some(binary) = convert.binary {
                    settings.binary = Some(binary);
                }
                merged.convert = Some(settings);
            }
        }

        merged
    }

    /// Resolve the engine from CLI, config, or default.
    fn resolve_engine(cli_value: Option<Engine>, config_value: Option<&str>) -> ToolKind {
        if let Some(engine) = cli_value {
            return engine.kind();
        }
        if let Some(name) = config_value {
            if let Ok(kind) = name.parse::<ToolKind>() {
                return kind;
            }
            eprintln!(
                "{} Unknown engine {name:?} in config, using libreoffice",
                "Warning:".yellow().bold()
            );
        }
        ToolKind::LibreOffice
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "docpress",
    about = "Convert office documents to PDF and other formats",
    long_about = "Convert office documents to PDF and other formats.\n\
                  \n\
                  The actual rendering is delegated to LibreOffice (headless) or unoconv;\n\
                  one of them must be installed and resolvable on the PATH.\n\
                  \n\
                  Defaults can be set via a .docpress.toml configuration file.",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a file, or every supported file in a directory
    #[command(long_about = "Convert a file, or every supported file in a directory.\n\
                      \n\
                      Supported inputs: DOC, DOCX, PPT, PPTX, XLS, XLSX, ODT, ODS, ODP,\n\
                      RTF, TXT, HTML. One failed file never aborts the batch; the run\n\
                      exits 0 as long as the conversion tool was available.")]
    Convert {
        /// Input file or directory (default: data/input)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Output directory (default: data/output, or from config)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Target format handed to the conversion tool (default: pdf)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Recursively scan subdirectories of the input directory
        #[arg(short, long)]
        recursive: bool,

        /// Conversion engine (default: libreoffice, or from config)
        #[arg(long, value_enum)]
        engine: Option<Engine>,

        /// Explicit path to the conversion binary instead of a PATH lookup
        #[arg(long, value_name = "PATH")]
        binary: Option<PathBuf>,

        /// Log executed commands and tool diagnostics
        #[arg(short, long)]
        debug: bool,
    },

    /// Check that the environment is ready for conversion
    #[command(long_about = "Check that the environment is ready for conversion:\n\
                      the conversion binary resolves, and the input, output and\n\
                      system temp directories are writable.")]
    Check {
        /// Conversion engine to probe (default: libreoffice, or from config)
        #[arg(long, value_enum)]
        engine: Option<Engine>,

        /// Explicit path to the conversion binary instead of a PATH lookup
        #[arg(long, value_name = "PATH")]
        binary: Option<PathBuf>,
    },

    /// List supported input formats
    Formats,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    match args.command {
        Commands::Convert {
            input,
            output,
            format,
            recursive,
            engine,
            binary,
            debug,
        } => {
            init_logging(debug);
            convert_command(input, output, format, recursive, engine, binary, &config)
        }
        Commands::Check { engine, binary } => {
            init_logging(false);
            check_command(engine, binary, &config)
        }
        Commands::Formats => {
            formats_command();
            Ok(())
        }
    }
}

/// Initialize logging to stderr; `--debug` raises the default filter so the
/// executed tool command lines become visible.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn convert_command(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    recursive: bool,
    engine: Option<Engine>,
    binary: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let settings = config.convert.clone().unwrap_or_default();
    let defaulted_input = input.is_none();
    let input = input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    let output_dir = output
        .or(settings.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let target_format = format
        .or(settings.format)
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string());
    let kind = Config::resolve_engine(engine, settings.engine.as_deref());
    let binary = binary.or(settings.binary);
    log::debug!("engine={kind} format={target_format} output={}", output_dir.display());

    eprintln!("{}", "Office Document Converter".bold());

    // Availability gate: the whole batch is aborted before any file is
    // touched when the tool is missing.
    let mut converter = BatchConverter::new(kind, &output_dir, target_format.as_str());
    if let Some(path) = &binary {
        converter = converter.with_binary(path);
    }
    let check = converter.check_availability();
    let Some(resolved) = check.resolved_path else {
        eprintln!(
            "{} {}",
            "✗".red().bold(),
            check.error.as_deref().unwrap_or("conversion tool not found")
        );
        print_install_hint(kind);
        bail!("conversion tool unavailable");
    };
    eprintln!("{} {kind} found at {}", "✓".green().bold(), resolved.display());
    // Reuse the verified path for every invocation in this run.
    let converter =
        BatchConverter::new(kind, &output_dir, target_format.as_str()).with_binary(resolved);

    // The conventional input directory is bootstrapped rather than reported
    // missing, so a fresh checkout works out of the box.
    if defaulted_input && !input.exists() {
        fs::create_dir_all(&input)
            .with_context(|| format!("Failed to create input directory: {}", input.display()))?;
    }

    let metadata = fs::metadata(&input)
        .with_context(|| format!("Invalid input path: {}", input.display()))?;
    let files: Vec<PathBuf> = if metadata.is_file() {
        vec![input.clone()]
    } else {
        eprintln!(
            "{} Scanning {}...",
            "Info:".blue().bold(),
            input.display()
        );
        Scanner::new()
            .recursive(recursive)
            .scan(&input)?
            .into_iter()
            .map(|file| file.path)
            .collect()
    };

    if files.is_empty() {
        eprintln!(
            "{} No supported files found in {}",
            "Warning:".yellow().bold(),
            input.display()
        );
        // An empty input directory is a notice, not an error.
        return Ok(());
    }

    eprintln!(
        "{} Found {} file(s) to convert",
        "Info:".blue().bold(),
        files.len().to_string().cyan()
    );

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("template is compile-time constant")
            .progress_chars("█▓▒░  "),
    );

    let summary = converter.convert_all(&files, |event| match event {
        BatchEvent::Started { file } => {
            let name = file.file_name().unwrap_or_default().to_string_lossy();
            progress.set_message(name.into_owned());
        }
        BatchEvent::Converted { .. } | BatchEvent::Failed { .. } => progress.inc(1),
        BatchEvent::Completed { .. } => {}
    })?;
    progress.finish_and_clear();

    for result in &summary.results {
        let input_name = result
            .input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        match &result.outcome {
            FileOutcome::Converted { output } => {
                let output_name = output.file_name().unwrap_or_default().to_string_lossy();
                eprintln!(
                    "{} {} -> {}",
                    "✓".green().bold(),
                    input_name,
                    output_name.bright_black()
                );
            }
            FileOutcome::Failed { error } => {
                eprintln!("{} {} - {}", "✗".red().bold(), input_name, error.red());
            }
        }
    }

    eprintln!("\n{}", "=== Conversion Summary ===".bold());
    eprintln!("{:<10} {}", "Total:", summary.total.to_string().cyan());
    eprintln!("{:<10} {}", "Success:", summary.succeeded.to_string().green());
    eprintln!(
        "{:<10} {}",
        "Failed:",
        if summary.failed > 0 {
            summary.failed.to_string().red()
        } else {
            summary.failed.to_string().normal()
        }
    );

    if summary.succeeded > 0 {
        eprintln!(
            "{} Files saved to: {}",
            "✓".green().bold(),
            output_dir.display()
        );
    }

    Ok(())
}

/// Print installation instructions for the missing tool.
fn print_install_hint(kind: ToolKind) {
    eprintln!();
    eprintln!("{}", "Install the conversion tool first:".yellow().bold());
    match kind {
        ToolKind::LibreOffice => {
            eprintln!("  Debian/Ubuntu:  sudo apt install libreoffice");
            eprintln!("  Fedora/RHEL:    sudo dnf install libreoffice");
            eprintln!("  Arch Linux:     sudo pacman -S libreoffice-still");
            eprintln!("  macOS:          brew install --cask libreoffice");
        }
        ToolKind::Unoconv => {
            eprintln!("  Debian/Ubuntu:  sudo apt install unoconv");
            eprintln!("  Arch Linux:     sudo pacman -S unoconv");
            eprintln!("  macOS:          brew install unoconv");
        }
    }
    eprintln!();
}

fn check_command(engine: Option<Engine>, binary: Option<PathBuf>, config: &Config) -> Result<()> {
    let settings = config.convert.clone().unwrap_or_default();
    let kind = Config::resolve_engine(engine, settings.engine.as_deref());
    let binary = binary.or(settings.binary);

    eprintln!("{}", "Environment Check".bold());
    let mut all_passed = true;

    let check: ToolCheck = match &binary {
        Some(path) => docpress_backend::probe::check_binary(path),
        None => docpress_backend::probe::check_tool(kind.tool()),
    };
    match check.resolved_path {
        Some(path) => {
            eprintln!("{} {kind} found at {}", "✓".green().bold(), path.display());
        }
        None => {
            eprintln!(
                "{} {}",
                "✗".red().bold(),
                check.error.as_deref().unwrap_or("conversion tool not found")
            );
            eprintln!(
                "{} Install {kind} and ensure it is on the PATH",
                "Warning:".yellow().bold()
            );
            all_passed = false;
        }
    }

    for (label, dir) in [
        ("input directory", Path::new(DEFAULT_INPUT_DIR)),
        ("output directory", Path::new(DEFAULT_OUTPUT_DIR)),
    ] {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!(
                "{} cannot create {label} {}: {e}",
                "✗".red().bold(),
                dir.display()
            );
            all_passed = false;
            continue;
        }
        match tempfile::tempfile_in(dir) {
            Ok(_) => eprintln!(
                "{} {label} is writable ({})",
                "✓".green().bold(),
                dir.display()
            ),
            Err(e) => {
                eprintln!(
                    "{} no write access to {label} {}: {e}",
                    "✗".red().bold(),
                    dir.display()
                );
                all_passed = false;
            }
        }
    }

    match tempfile::tempfile() {
        Ok(_) => eprintln!("{} system temp directory is writable", "✓".green().bold()),
        Err(e) => {
            eprintln!("{} no write access to system temp: {e}", "✗".red().bold());
            all_passed = false;
        }
    }

    if all_passed {
        eprintln!("\n{}", "All checks passed. The environment is ready.".green());
        Ok(())
    } else {
        bail!("environment check failed");
    }
}

fn formats_command() {
    println!("{}", "Supported input formats:".bold());
    for format in InputFormat::all() {
        let extensions = format
            .extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<6} {extensions}", format.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_engine_cli_wins() {
        let kind = Config::resolve_engine(Some(Engine::Unoconv), Some("libreoffice"));
        assert_eq!(kind, ToolKind::Unoconv);
    }

    #[test]
    fn test_resolve_engine_from_config() {
        let kind = Config::resolve_engine(None, Some("unoconv"));
        assert_eq!(kind, ToolKind::Unoconv);
    }

    #[test]
    fn test_resolve_engine_default() {
        assert_eq!(Config::resolve_engine(None, None), ToolKind::LibreOffice);
    }

    #[test]
    fn test_config_merge_project_over_user() {
        let user = Config {
            convert: Some(ConvertSettings {
                format: Some("pdf".to_string()),
                output: Some(PathBuf::from("/user/out")),
                engine: Some("unoconv".to_string()),
                binary: None,
            }),
        };
        let project = Config {
            convert: Some(ConvertSettings {
                format: Some("html".to_string()),
                output: None,
                engine: None,
                binary: None,
            }),
        };

        let merged = Config::merge(Some(user), Some(project));
        let settings = merged.convert.unwrap();
        assert_eq!(settings.format.as_deref(), Some("html"));
        assert_eq!(settings.output, Some(PathBuf::from("/user/out")));
        assert_eq!(settings.engine.as_deref(), Some("unoconv"));
    }
}
