//! # hdeco
//!
//! Automatic heading numbering for markdown documents.
//!
//! ## Usage
//!
//! List headings with their labels:
//! ```sh
//! hdeco README.md
//! ```
//!
//! Print the document with labels inserted:
//! ```sh
//! hdeco README.md render
//! ```
//!
//! Re-render the outline labels whenever the file changes:
//! ```sh
//! hdeco -S outline README.md watch
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command, ConfigAction, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail, eyre};
use heading_decorator::config::{Config, SurfaceConfig};
use heading_decorator::output::{DecoratedHeading, DocumentOutput};
use heading_decorator::pipeline::{self, Coverage};
use heading_decorator::watcher::FileWatcher;
use heading_decorator::{SettingsEvent, SettingsStore, parser};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use unicode_width::UnicodeWidthStr;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_logging(args.verbose);

    // Config management doesn't need a document
    if let Some(Command::Config { ref action }) = args.command {
        return handle_config(&args, action);
    }

    let config = load_config(&args)?;

    if matches!(args.command, Some(Command::Watch)) {
        return watch(&args, config);
    }

    let (content, source) = read_input(args.file.as_deref())?;
    let surface = surface_config(&args, &config);

    match args.command {
        Some(Command::Render) => print!("{}", pipeline::render_markdown(&surface, &content)),
        _ => println!("{}", list_output(&args, &surface, &content, source)?),
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );

    let _ = subscriber.try_init();
}

fn load_config(args: &Cli) -> Result<Config> {
    match args.config {
        Some(ref path) => Config::load_from(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::load()),
    }
}

/// The selected surface's settings with command line overrides applied.
fn surface_config(args: &Cli, config: &Config) -> SurfaceConfig {
    let mut surface = config.surface(args.surface).clone();
    args.apply_overrides(&mut surface);
    surface
}

/// Read the document from a file, '-' or piped stdin.
fn read_input(file: Option<&Path>) -> Result<(String, Option<String>)> {
    match file {
        Some(path) if path == Path::new("-") => Ok((read_stdin()?, None)),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            Ok((content, Some(path.display().to_string())))
        }
        None => {
            if std::io::stdin().is_terminal() {
                eprintln!("Error: markdown file argument is required");
                eprintln!("\nUsage: hdeco [OPTIONS] <FILE> [COMMAND]");
                eprintln!("       hdeco [OPTIONS] - [COMMAND]");
                eprintln!("       cat doc.md | hdeco [OPTIONS] [COMMAND]");
                process::exit(1);
            }
            Ok((read_stdin()?, None))
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .wrap_err("failed to read stdin")?;
    Ok(content)
}

fn list_output(
    args: &Cli,
    surface: &SurfaceConfig,
    content: &str,
    source: Option<String>,
) -> Result<String> {
    let mut doc = parser::parse_markdown(content);
    let coverage = match args.until_line {
        Some(line) => {
            doc.headings.retain(|h| h.line <= line);
            Coverage::Partial
        }
        None => Coverage::Complete,
    };

    let (options, headings) = pipeline::decorate_document(surface, &doc, coverage);

    match args.output {
        OutputFormat::Plain => Ok(format_plain(&headings)),
        OutputFormat::Json => {
            let output =
                DocumentOutput::new(source, args.surface, options.ignore_top_level, headings);
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}

/// One heading per line, labels padded to a common display width.
fn format_plain(headings: &[DecoratedHeading]) -> String {
    let width = headings
        .iter()
        .map(|h| UnicodeWidthStr::width(h.label.as_str()))
        .max()
        .unwrap_or(0);

    headings
        .iter()
        .map(|h| {
            let pad = " ".repeat(width - UnicodeWidthStr::width(h.label.as_str()));
            let line = format!("{}{} {} {}", h.label, pad, "#".repeat(h.level), h.text);
            line.trim_start().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn watch(args: &Cli, config: Config) -> Result<()> {
    let Some(path) = args.file.as_deref().filter(|p| *p != Path::new("-")) else {
        bail!("watch needs a markdown file path");
    };
    let doc_path = path
        .canonicalize()
        .wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let config_path: Option<PathBuf> = args
        .config
        .clone()
        .or_else(Config::config_path)
        .filter(|p| p.exists())
        .and_then(|p| p.canonicalize().ok());

    let mut store = SettingsStore::new(config);
    let settings_events = store.subscribe();

    let mut watcher = FileWatcher::new()?;
    watcher.watch(&doc_path)?;
    if let Some(ref config_path) = config_path {
        watcher.watch(config_path)?;
    }

    let render = |store: &SettingsStore| -> Result<()> {
        let content = std::fs::read_to_string(&doc_path)?;
        let surface = surface_config(args, store.config());
        let source = Some(path.display().to_string());
        println!("{}\n", list_output(args, &surface, &content, source)?);
        Ok(())
    };

    render(&store)?;
    tracing::info!(path = %doc_path.display(), "watching for changes");

    loop {
        std::thread::sleep(Duration::from_millis(100));

        let changed = watcher.changed_paths();
        let mut rerender = changed.contains(&doc_path);

        if let Some(ref config_path) = config_path
            && changed.contains(config_path)
        {
            match Config::load_from(config_path) {
                Ok(config) => {
                    store.replace(config);
                }
                Err(e) => tracing::warn!(error = %e, "keeping previous settings"),
            }
        }

        while let Ok(SettingsEvent::Changed(surfaces)) = settings_events.try_recv() {
            rerender |= surfaces.contains(&args.surface);
        }

        if rerender && let Err(e) = render(&store) {
            tracing::warn!(error = %e, "render failed");
        }
    }
}

fn handle_config(args: &Cli, action: &ConfigAction) -> Result<()> {
    let path = args
        .config
        .clone()
        .or_else(Config::config_path)
        .ok_or_else(|| eyre!("could not determine config directory"))?;

    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => {
            let config = load_config(args)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                eprintln!("Config file already exists: {}", path.display());
                eprintln!("Use --force to overwrite it.");
                process::exit(1);
            }
            match args.config {
                Some(ref path) => Config::default().save_to(path)?,
                None => Config::default().save()?,
            }
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
