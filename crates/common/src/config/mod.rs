//! Configuration management for PaperScope
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Corpus source configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Node/edge presentation configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Force-directed layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Path to the primary paper table
    #[serde(default = "default_papers_path")]
    pub papers_path: String,

    /// Path to the secondary paper table for the citation-graph variant
    #[serde(default = "default_citation_papers_path")]
    pub citation_papers_path: String,

    /// Path to the citation edge table
    #[serde(default = "default_citations_path")]
    pub citations_path: String,

    /// Separator for multi-value cells (authors, keywords, cited papers)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Label truncation threshold in characters
    #[serde(default = "default_label_max_chars")]
    pub label_max_chars: usize,

    /// Fill color for paper nodes
    #[serde(default = "default_paper_color")]
    pub paper_color: String,

    /// Fill color for author nodes
    #[serde(default = "default_author_color")]
    pub author_color: String,

    /// Shape for paper nodes
    #[serde(default = "default_paper_shape")]
    pub paper_shape: String,

    /// Shape for author nodes
    #[serde(default = "default_author_shape")]
    pub author_shape: String,

    /// Edge color when no relation label matches the palette
    #[serde(default = "default_edge_color")]
    pub default_edge_color: String,
}

/// Spring-embedder constants
///
/// Defaults mirror the physics block handed to the external renderer so the
/// precomputed positions and the renderer's own stabilization agree.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Pairwise repulsion strength (negative = repulsive)
    #[serde(default = "default_repulsion")]
    pub repulsion: f32,

    /// Rest length of edge springs
    #[serde(default = "default_spring_length")]
    pub spring_length: f32,

    /// Spring stiffness
    #[serde(default = "default_spring_constant")]
    pub spring_constant: f32,

    /// Velocity damping per iteration
    #[serde(default = "default_damping")]
    pub damping: f32,

    /// Per-iteration displacement cap
    #[serde(default = "default_max_step")]
    pub max_step: f32,

    /// Iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Final coordinate scale (positions are normalized then scaled)
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Seed for the deterministic initial placement
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logging: bool,
}

// Default value functions
fn default_papers_path() -> String { "data/papers.csv".to_string() }
fn default_citation_papers_path() -> String { "data/papers.csv".to_string() }
fn default_citations_path() -> String { "data/citations.csv".to_string() }
fn default_delimiter() -> char { crate::DEFAULT_FIELD_DELIMITER }
fn default_label_max_chars() -> usize { 15 }
fn default_paper_color() -> String { "#87CEFA".to_string() }
fn default_author_color() -> String { "#FFD580".to_string() }
fn default_paper_shape() -> String { "box".to_string() }
fn default_author_shape() -> String { "ellipse".to_string() }
fn default_edge_color() -> String { "#CCCCCC".to_string() }
fn default_repulsion() -> f32 { -100.0 }
fn default_spring_length() -> f32 { 100.0 }
fn default_spring_constant() -> f32 { 0.001 }
fn default_damping() -> f32 { 0.4 }
fn default_max_step() -> f32 { 50.0 }
fn default_max_iterations() -> usize { 1000 }
fn default_scale() -> f32 { 1000.0 }
fn default_seed() -> u64 { 42 }
fn default_log_level() -> String { "info".to_string() }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            papers_path: default_papers_path(),
            citation_papers_path: default_citation_papers_path(),
            citations_path: default_citations_path(),
            delimiter: default_delimiter(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            label_max_chars: default_label_max_chars(),
            paper_color: default_paper_color(),
            author_color: default_author_color(),
            paper_shape: default_paper_shape(),
            author_shape: default_author_shape(),
            default_edge_color: default_edge_color(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            repulsion: default_repulsion(),
            spring_length: default_spring_length(),
            spring_constant: default_spring_constant(),
            damping: default_damping(),
            max_step: default_max_step(),
            max_iterations: default_max_iterations(),
            scale: default_scale(),
            seed: default_seed(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            display: DisplayConfig::default(),
            layout: LayoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        // Pick up a .env file if one is present
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__LAYOUT__SEED=7
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
