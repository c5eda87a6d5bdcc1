use clap::{Parser, Subcommand, ValueEnum};
use heading_decorator::config::{Surface, SurfaceConfig};
use heading_decorator::decorator::{Position, StyleType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hdeco")]
#[command(version)]
#[command(about = "Number and label markdown headings")]
#[command(
    long_about = "hdeco - automatic heading numbering for markdown.\n\n\
    Scans a document for headings (skipping front-matter, fenced code and display math)\n\
    and computes a label for each one using the settings of a rendering surface.\n\n\
    Examples:\n  \
    hdeco README.md                     # List headings with their labels\n  \
    hdeco README.md render              # Print the document with labels inserted\n  \
    hdeco --style upper-roman doc.md    # Override the numbering style\n  \
    hdeco -S outline doc.md watch       # Re-render whenever the file changes\n  \
    hdeco config init                   # Write the default config file"
)]
pub struct Cli {
    /// Markdown file to decorate, or '-' for stdin
    ///
    /// If no file is specified and stdin is piped, input is read from stdin.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Surface whose settings are used (reading, preview, outline)
    #[arg(short = 'S', long = "surface", global = true, default_value = "reading")]
    pub surface: Surface,

    /// Read settings from this file instead of the default config path
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for the heading list
    #[arg(short = 'o', long = "output", default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Numbering style (decimal, lower-alpha, upper-roman, custom-ident, string, ...)
    #[arg(long = "style", value_name = "STYLE", global = true)]
    pub style: Option<StyleType>,

    /// Delimiter placed between label entries
    #[arg(long = "delimiter", value_name = "TEXT", global = true)]
    pub delimiter: Option<String>,

    /// Use fixed per-level labels instead of counters
    #[arg(long = "unordered", global = true)]
    pub unordered: bool,

    /// Render levels skipped before they were seen as 0 instead of 1
    #[arg(long = "allow-zero-level", global = true)]
    pub allow_zero_level: bool,

    /// Leave out top levels that hold a single heading
    #[arg(long = "ignore-single", global = true)]
    pub ignore_single: bool,

    /// Deepest heading level that gets a label (1-6)
    #[arg(short = 'L', long = "max-level", value_name = "LEVEL", global = true)]
    pub max_level: Option<usize>,

    /// Label placement (before, after, before-inside, after-inside)
    #[arg(long = "position", value_name = "POSITION", global = true)]
    pub position: Option<Position>,

    /// Only decorate headings up to this line, as a viewport would
    ///
    /// The rest of the document is treated as not yet known, which affects
    /// --ignore-single.
    #[arg(long = "until-line", value_name = "LINE", global = true)]
    pub until_line: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List headings with their labels (default)
    List,

    /// Print the document with labels spliced into its heading lines
    Render,

    /// Keep listing headings whenever the document or config file changes
    Watch,

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

impl Cli {
    /// Apply command line overrides on top of the configured surface.
    pub fn apply_overrides(&self, surface: &mut SurfaceConfig) {
        if let Some(style) = self.style {
            surface.style_type = style;
        }
        if let Some(ref delimiter) = self.delimiter {
            surface.delimiter = delimiter.clone();
        }
        if self.unordered {
            surface.ordered = false;
        }
        if self.allow_zero_level {
            surface.allow_zero_level = true;
        }
        if self.ignore_single {
            surface.ignore_single = true;
        }
        if let Some(level) = self.max_level {
            surface.max_rec_level = level;
        }
        if let Some(position) = self.position {
            surface.position = position;
        }
    }
}
