use std::fmt;
use std::error::Error;
use std::fs::File;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use serde_json;
use slog;
use log;

use clap::Parser;

use termvec_core::DocId;


#[derive(Debug)]
pub enum ConfigError {
    InvalidDocId(String, ParseIntError),
    InvalidLogLevel(String),
    Io(PathBuf, io::Error),
    Json(PathBuf, serde_json::Error),
}


impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidDocId(ref value, ref e) => write!(f, "invalid document id {:?}: {}", value, e),
            ConfigError::InvalidLogLevel(ref value) => write!(f, "unknown log level {:?}", value),
            ConfigError::Io(ref path, ref e) => write!(f, "cannot read {}: {}", path.display(), e),
            ConfigError::Json(ref path, ref e) => write!(f, "cannot parse {}: {}", path.display(), e),
        }
    }
}


impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::InvalidDocId(_, ref e) => Some(e),
            ConfigError::Io(_, ref e) => Some(e),
            ConfigError::Json(_, ref e) => Some(e),
            ConfigError::InvalidLogLevel(_) => None,
        }
    }
}


/// Document ids are decimal, or hexadecimal with a "0x" prefix
pub fn parse_doc_id(value: &str) -> Result<DocId, ConfigError> {
    let parsed = if value.starts_with("0x") {
        DocId::from_hex(&value[2..])
    } else {
        value.parse::<u32>().map(DocId)
    };

    parsed.map_err(|e| ConfigError::InvalidDocId(value.to_string(), e))
}


/// Rebuilds the term vector of one document field from a JSON fixture
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "termvec")]
#[command(version)]
pub struct Args {
    /// JSON config file, overridden by the other options
    #[arg(long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Index the documents are loaded into
    #[arg(long = "index", value_name = "NAME")]
    pub index_name: Option<String>,

    /// One of error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// JSON file holding the documents to index
    #[arg(value_name = "DOCUMENTS")]
    pub documents_path: PathBuf,

    /// Document to rebuild, decimal or 0x-prefixed hex
    #[arg(value_name = "DOC_ID", value_parser = parse_doc_id)]
    pub doc_id: DocId,

    /// Field to rebuild
    #[arg(value_name = "FIELD")]
    pub field: String,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the index documents are loaded into and read from
    pub index_name: String,

    /// One of error, warn, info, debug or trace
    pub log_level: String,

    /// Record character offsets alongside positions
    pub store_offsets: bool,
}


impl Default for Config {
    fn default() -> Config {
        Config {
            index_name: "index".to_string(),
            log_level: "info".to_string(),
            store_offsets: true,
        }
    }
}


impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        serde_json::from_reader(file).map_err(|e| ConfigError::Json(path.to_path_buf(), e))
    }

    /// Loads the config file named on the command line, if any, then applies
    /// the overriding flags
    pub fn from_args(args: &Args) -> Result<Config, ConfigError> {
        let mut config = match args.config_path {
            Some(ref path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(ref index_name) = args.index_name {
            config.index_name = index_name.clone();
        }

        if let Some(ref log_level) = args.log_level {
            config.log_level = log_level.clone();
        }

        config.levels()?;
        Ok(config)
    }

    /// The configured level, for the slog drain and for the log facade
    pub fn levels(&self) -> Result<(slog::Level, log::LevelFilter), ConfigError> {
        match self.log_level.to_lowercase().as_str() {
            "error" => Ok((slog::Level::Error, log::LevelFilter::Error)),
            "warn" => Ok((slog::Level::Warning, log::LevelFilter::Warn)),
            "info" => Ok((slog::Level::Info, log::LevelFilter::Info)),
            "debug" => Ok((slog::Level::Debug, log::LevelFilter::Debug)),
            "trace" => Ok((slog::Level::Trace, log::LevelFilter::Trace)),
            _ => Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }
    }
}
