//! Command line configuration and persisted settings.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::arxiv::{DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT, SearchField, SortOrder};
use crate::markdown::DEFAULT_BASE_SIZE;
use crate::summarize::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Environment variable overriding the stored API key.
pub const API_KEY_ENV: &str = "ARXSHELF_API_KEY";

/// Command line configuration for arxshelf.
#[derive(Debug, Clone, Parser)]
#[command(name = "arxshelf", version, about, long_about = None)]
pub struct Config {
    /// Directory holding the library, last search and settings
    #[arg(long, global = true, env = "ARXSHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search arXiv and remember the results
    Search(SearchArgs),
    /// List saved articles
    List,
    /// Save an article from the last search
    Save {
        /// Result number, arXiv id or full entry id
        reference: String,
    },
    /// Remove a saved article
    Remove {
        /// Library position, arXiv id or full entry id
        reference: String,
    },
    /// Show article details
    Show {
        /// Library or search reference
        reference: String,
        /// Render the details as an HTML page and open it
        #[arg(long)]
        open: bool,
    },
    /// Download an article PDF
    Pdf {
        reference: String,
        /// Open a temporary copy in the system viewer instead of saving
        #[arg(long)]
        open: bool,
        /// Target directory, defaults to the downloads folder
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize an article PDF with the configured chat model
    Summarize {
        reference: String,
        /// Render the summary as an HTML page and open it
        #[arg(long)]
        open: bool,
    },
    /// Generate a static HTML site of the saved library
    Export {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
        /// Do not open the generated index in a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Render a Markdown subset document to a standalone HTML page
    Render {
        input: PathBuf,
        /// Output file, defaults to the input with an .html extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change persisted settings
    Settings(SettingsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search terms
    #[arg(required = true, num_args = 1..)]
    pub terms: Vec<String>,

    /// Metadata field to search
    #[arg(short, long, value_enum, default_value_t = SearchField::Title)]
    pub field: SearchField,

    /// Result ordering
    #[arg(short, long, value_enum, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,

    /// Maximum number of results (1-2000), defaults to the stored setting
    #[arg(
        short = 'n',
        long,
        value_parser = clap::value_parser!(u64).range(1..=MAX_RESULTS_LIMIT as u64)
    )]
    pub max_results: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    /// API key for the summary endpoint ("" clears it)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base font size in pixels for rendered text
    #[arg(long)]
    pub base_font_size: Option<f32>,

    /// Default number of search results
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Chat completions endpoint used for summaries
    #[arg(long)]
    pub summary_endpoint: Option<String>,

    /// Chat model used for summaries
    #[arg(long)]
    pub summary_model: Option<String>,

    /// Directory PDFs are saved to
    #[arg(long)]
    pub downloads_dir: Option<PathBuf>,
}

impl SettingsArgs {
    /// Whether any value is being changed.
    pub fn has_changes(&self) -> bool {
        self.api_key.is_some()
            || self.base_font_size.is_some()
            || self.max_results.is_some()
            || self.summary_endpoint.is_some()
            || self.summary_model.is_some()
            || self.downloads_dir.is_some()
    }
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Returns the data directory from the flag or the platform default.
    ///
    /// # Errors
    ///
    /// Returns error if no flag is given and the platform has no data
    /// directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|dir| dir.join("arxshelf"))
            .context("Cannot determine a data directory; pass --data-dir")
    }

    /// Log level implied by the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_font_size: f32,
    pub max_results: usize,
    pub summary_endpoint: String,
    pub summary_model: String,
    pub downloads_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_font_size: DEFAULT_BASE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
            summary_endpoint: DEFAULT_ENDPOINT.to_string(),
            summary_model: DEFAULT_MODEL.to_string(),
            downloads_dir: None,
        }
    }
}

impl Settings {
    /// Loads `settings.toml` from `data_dir`, using defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes settings to `settings.toml` in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if validation fails or the file cannot be written.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        self.validate()?;
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let path = data_dir.join(SETTINGS_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write settings: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace settings: {}", path.display()))
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the font size is not above 1 or the result count is
    /// outside `1..=2000`.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_font_size > 1.0) {
            bail!(
                "Base font size must be greater than 1, got {}",
                self.base_font_size
            );
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            bail!(
                "Max results must be between 1 and {}, got {}",
                MAX_RESULTS_LIMIT,
                self.max_results
            );
        }
        Ok(())
    }

    /// Applies the values given on the command line.
    pub fn apply(&mut self, args: &SettingsArgs) {
        if let Some(key) = &args.api_key {
            let key = key.trim();
            self.api_key = (!key.is_empty()).then(|| key.to_string());
        }
        if let Some(size) = args.base_font_size {
            self.base_font_size = size;
        }
        if let Some(max) = args.max_results {
            self.max_results = max;
        }
        if let Some(endpoint) = &args.summary_endpoint {
            self.summary_endpoint = endpoint.clone();
        }
        if let Some(model) = &args.summary_model {
            self.summary_model = model.clone();
        }
        if let Some(dir) = &args.downloads_dir {
            self.downloads_dir = Some(dir.clone());
        }
    }

    /// API key from the environment, falling back to the stored one.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Stored key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            None => "(not set)".to_string(),
            Some(key) => {
                let chars: Vec<char> = key.chars().collect();
                let visible = chars.len().saturating_sub(4);
                let tail: String = chars[visible..].iter().collect();
                format!("{}{}", "*".repeat(visible.min(8)), tail)
            }
        }
    }
}
