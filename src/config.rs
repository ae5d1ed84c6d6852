//! Configuration for the reader and the `cellphy-reader` binary.
//!
//! Two kinds of configuration live here:
//! - [`ReaderConfig`]: behavior of the layer builder, deserializable from
//!   JSON so hosts can pass it through their own settings
//! - [`Cli`]: command-line arguments via clap, with environment fallbacks
//!
//! # Environment Variables
//!
//! - `CELLPHY_OUTPUT` - Output format of `check` (`text` or `json`, default: text)
//! - `RUST_LOG` - Log filter, overrides `--verbose`

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

// =============================================================================
// Reader Configuration
// =============================================================================

/// How the layer of a single-channel image is named.
///
/// Multi-channel images always use each channel's own name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingleChannelNaming {
    /// Leave the name empty.
    ///
    /// The single-channel branch never binds a channel name, so the layer
    /// comes out unnamed.
    #[default]
    Unset,

    /// Use the first channel name reported by the image, or an empty name
    /// if the image reports none.
    ChannelName,
}

/// Layer builder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub single_channel_naming: SingleChannelNaming,
}

impl ReaderConfig {
    /// Parse from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_single_channel_naming(mut self, naming: SingleChannelNaming) -> Self {
        self.single_channel_naming = naming;
        self
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// cellphy-reader - Microscopy reader adapter for Leica LIF and Zeiss CZI files.
#[derive(Parser, Debug, Clone)]
#[command(name = "cellphy-reader")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Report which paths the reader would accept.
    ///
    /// Only the path is inspected; files are not opened.
    Check(CheckConfig),
}

/// Output format for `check`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Paths to check.
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "CELLPHY_OUTPUT")]
    pub output: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one path is required".to_string());
        }
        if self.paths.iter().any(|p| p.is_empty()) {
            return Err("Paths must not be empty".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
