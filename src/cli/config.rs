use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::merge::merge_model::{ArrayMergeKind, MergeOptions};
use crate::trace::logger::TraceLogger;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-serialize",
    version,
    about = "Collect form values from extracted elements and deep-merge JSON documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v echoes diagnostics to stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-serialize.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append diagnostics as JSON lines to this file
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve element values into per-form objects
    Collect {
        /// JSON file holding an array of extracted elements
        #[arg(long)]
        elements: String,

        /// Only output this form
        #[arg(long)]
        form: Option<String>,

        /// JSON or YAML document the collected values are merged onto
        #[arg(long)]
        base: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Deep-merge JSON or YAML documents, left to right
    Merge {
        /// Documents to merge (at least two)
        #[arg(required = true, num_args = 1..)]
        files: Vec<String>,

        /// Rebuild retained objects and arrays through the merge
        #[arg(long)]
        clone: bool,

        /// Array strategy: union, replace or concat
        #[arg(long)]
        array_merge: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-serialize.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub clone: bool,

    #[serde(default)]
    pub array_merge: ArrayMergeKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-serialize.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Merge options from CLI flags over config values. `--clone` can only turn
/// cloning on; an explicit `--array-merge` replaces the configured strategy.
pub fn build_merge_options(
    clone: bool,
    array_merge: Option<&str>,
    config: &MergeConfig,
) -> Result<MergeOptions, String> {
    let kind = match array_merge {
        Some(name) => name.parse::<ArrayMergeKind>()?,
        None => config.array_merge,
    };

    Ok(MergeOptions::new()
        .with_clone(clone || config.clone)
        .with_array_merge_kind(kind))
}

/// Trace logger for the CLI: `--trace` wins over the config file, and any
/// verbosity echoes warnings to stderr.
pub fn build_tracer(trace: Option<&str>, config: &TraceConfig, verbose: u8) -> Arc<TraceLogger> {
    let logger = match trace.or(config.path.as_deref()) {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    Arc::new(logger.with_echo(verbose > 0))
}
