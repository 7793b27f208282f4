//! Configuration for the graph connection, lexicon source and intent table
//!
//! Loads configuration from config.yml file

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::kgqa::{IntentRule, IntentTable};

/// Default constants (fallback if config.yml not found)
pub const CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_URI: &str = "bolt://localhost:7687";
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_DATABASE: &str = "default";
pub const DEFAULT_LEXICON: &str = "Disease.csv";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONNECTIONS: usize = 4;

/// YAML config structures
#[derive(Debug, Default, Deserialize)]
struct YamlConfig {
    graph: Option<GraphYaml>,
    lexicon: Option<LexiconYaml>,
    intents: Option<Vec<IntentRule>>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphYaml {
    uri: Option<String>,
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
    query_timeout_secs: Option<u64>,
    max_connections: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconYaml {
    path: Option<PathBuf>,
}

/// Connection settings for the Bolt graph store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    /// 0 disables the timeout
    pub query_timeout_secs: u64,
    pub max_connections: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl GraphSettings {
    pub fn query_timeout(&self) -> Option<Duration> {
        (self.query_timeout_secs > 0).then(|| Duration::from_secs(self.query_timeout_secs))
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub graph: GraphSettings,
    pub lexicon_path: PathBuf,
    pub intents: IntentTable,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load config.yml from the working directory or its parent, or use defaults.
    ///
    /// A config file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        Self::load_dotenv();
        for candidate in [PathBuf::from(CONFIG_FILE), Path::new("..").join(CONFIG_FILE)] {
            if candidate.exists() {
                return Self::load_from_file(candidate);
            }
        }
        Ok(Self::defaults().with_env_overrides())
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Resolve a value: `${VAR}` placeholders come from the environment, and
    /// an explicitly set `env_key` wins over the file.
    fn resolve_env_string(value: Option<String>, env_key: &str) -> Option<String> {
        if let Ok(env_val) = std::env::var(env_key) {
            return Some(env_val);
        }
        match value {
            Some(v) if v.starts_with("${") && v.ends_with('}') => {
                std::env::var(&v[2..v.len() - 1]).ok()
            }
            other => other,
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text, then apply environment overrides.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let yaml: YamlConfig = if content.trim().is_empty() {
            YamlConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let defaults = GraphSettings::default();
        let graph_yaml = yaml.graph.unwrap_or_default();

        let graph = GraphSettings {
            uri: graph_yaml.uri.unwrap_or(defaults.uri),
            user: graph_yaml.user.unwrap_or(defaults.user),
            password: graph_yaml.password.unwrap_or(defaults.password),
            database: graph_yaml.database.unwrap_or(defaults.database),
            query_timeout_secs: graph_yaml
                .query_timeout_secs
                .unwrap_or(defaults.query_timeout_secs),
            max_connections: graph_yaml
                .max_connections
                .unwrap_or(defaults.max_connections)
                .max(1),
        };

        let intents = match yaml.intents {
            Some(rules) => IntentTable::new(rules)?,
            None => IntentTable::standard(),
        };

        let config = Self {
            graph,
            lexicon_path: yaml
                .lexicon
                .and_then(|l| l.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON)),
            intents,
        };

        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        let graph = &mut self.graph;
        if let Some(uri) = Self::resolve_env_string(Some(graph.uri.clone()), "NEO4J_URI") {
            graph.uri = uri;
        }
        if let Some(user) = Self::resolve_env_string(Some(graph.user.clone()), "NEO4J_USER") {
            graph.user = user;
        }
        graph.password = Self::resolve_env_string(Some(graph.password.clone()), "NEO4J_PASSWORD")
            .unwrap_or_default();
        if let Some(db) = Self::resolve_env_string(Some(graph.database.clone()), "NEO4J_DATABASE") {
            graph.database = db;
        }
        if let Ok(path) = std::env::var("KGQA_LEXICON") {
            self.lexicon_path = PathBuf::from(path);
        }
        self
    }

    /// Create config with built-in defaults
    fn defaults() -> Self {
        Self {
            graph: GraphSettings::default(),
            lexicon_path: PathBuf::from(DEFAULT_LEXICON),
            intents: IntentTable::standard(),
        }
    }
}
