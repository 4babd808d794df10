//! CLI argument definitions for `ontonav`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ontonav",
    version,
    about = "Build and inspect shareable ontology editor URLs",
    long_about = "Build and inspect shareable ontology editor URLs.\n\n\
                  Application host, path and name come from --config or the\n\
                  --host/--path/--name flags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub app: AppArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Where the application lives.
#[derive(Args, Debug, Clone)]
pub struct AppArgs {
    /// TOML settings file; overrides the individual flags below.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Application host, optionally with a port.
    #[arg(long = "host", default_value = "localhost", global = true)]
    pub host: String,

    /// Application path, e.g. /webonto.
    #[arg(long = "path", default_value = "/", global = true)]
    pub path: String,

    /// Display name used for the application anchor.
    #[arg(long = "name", default_value = "WebOnto", global = true)]
    pub display_name: String,

    /// Use https instead of http.
    #[arg(long = "https", global = true)]
    pub https: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the application root URL.
    AppUrl,

    /// Print an HTML link to the application.
    Anchor,

    /// Print the URL opening a project.
    ProjectUrl {
        #[arg(value_name = "PROJECT_ID")]
        project_id: String,
    },

    /// Print the URL selecting an entity in a project.
    EntityUrl {
        #[arg(value_name = "PROJECT_ID")]
        project_id: String,
        /// Entity type tag, e.g. Class or NamedIndividual.
        #[arg(value_name = "ENTITY_TYPE")]
        entity_type: String,
        #[arg(value_name = "IRI")]
        iri: String,
    },

    /// Encode a place as a URL fragment.
    Encode(EncodeArgs),

    /// Decode a fragment or full URL back into a place.
    Decode {
        #[arg(value_name = "FRAGMENT_OR_URL")]
        input: String,
    },

    /// List the perspective each entity type opens in.
    Perspectives,
}

#[derive(Args)]
pub struct EncodeArgs {
    #[arg(value_name = "PROJECT_ID")]
    pub project_id: String,

    /// Perspective name (default: Classes).
    #[arg(long = "perspective")]
    pub perspective: Option<String>,

    /// Selected entity as TYPE=IRI; repeat to select several, in order.
    #[arg(long = "entity", value_name = "TYPE=IRI")]
    pub entities: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
