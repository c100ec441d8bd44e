use clap::Parser;
use std::path::PathBuf;

/// Render HTML form fields from a JSON Schema document
#[derive(Parser, Debug, Clone)]
#[command(name = "yajsf", version, about, long_about = None)]
pub struct Cli {
    /// Path to the schema document (JSON or YAML)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Current values keyed by field name
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Per-field options: widget, title and attrs
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Error messages keyed by field name
    #[arg(long)]
    pub errors: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, env = "YAJSF_CONFIG", default_value = "yajsf.toml")]
    pub config: PathBuf,

    /// Write the rendered form here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Widget for properties without enum, format or type
    #[arg(long, env = "YAJSF_DEFAULT_WIDGET")]
    pub default_widget: Option<String>,

    /// Prefix prepended to every label
    #[arg(long)]
    pub title_prefix: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "YAJSF_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable browser validation on the rendered form
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub novalidate: Option<bool>,
}
