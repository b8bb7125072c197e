extern crate clap;
#[macro_use]
extern crate slog;
extern crate slog_term;
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate unicode_segmentation;
extern crate termvec_core;
extern crate termvec_rowstore;

mod config;
mod logger;
mod loader;

use std::fmt;
use std::io;
use std::process;

use clap::Parser;
use slog::{Drain, Logger};

use termvec_core::TermFreqVector;
use termvec_rowstore::{MemoryRowStore, TermVectorAssembler, TermVectorError};

use config::{Args, Config};
use loader::LoadError;


const VERSION: &'static str = env!("CARGO_PKG_VERSION");


#[derive(Debug)]
enum RunError {
    Load(LoadError),
    TermVector(TermVectorError),
}


impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RunError::Load(ref e) => fmt::Display::fmt(e, f),
            RunError::TermVector(ref e) => fmt::Display::fmt(e, f),
        }
    }
}


impl From<LoadError> for RunError {
    fn from(e: LoadError) -> RunError {
        RunError::Load(e)
    }
}


impl From<TermVectorError> for RunError {
    fn from(e: TermVectorError) -> RunError {
        RunError::TermVector(e)
    }
}


fn make_logger(level: slog::Level) -> Logger {
    let decorator = slog_term::PlainSyncDecorator::new(io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();

    Logger::root(drain, o!("version" => VERSION))
}


fn run(log: &Logger, config: &Config, args: &Args) -> Result<TermFreqVector, RunError> {
    let documents = loader::load_documents(&args.documents_path)?;
    let store = MemoryRowStore::new();

    for doc in documents.iter() {
        let term_count = loader::index_document(&store, &config.index_name, doc, config.store_offsets)?;
        debug!(log, "[tv] indexed document"; "index" => &config.index_name, "doc" => doc.id, "terms" => term_count);
    }
    info!(log, "[tv] loaded documents"; "index" => &config.index_name, "count" => documents.len());

    let vector = TermVectorAssembler::new(&store).assemble(&config.index_name, &args.field, args.doc_id)?;
    info!(log, "[tv] assembled term vector"; "doc" => args.doc_id.to_hex(), "field" => &args.field, "terms" => vector.size());

    Ok(vector)
}


fn main() {
    let args = Args::parse();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(2);
        }
    };

    let (slog_level, log_level) = match config.levels() {
        Ok(levels) => levels,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(2);
        }
    };

    let log = make_logger(slog_level);
    if let Err(error) = logger::init(log.clone(), log_level) {
        warn!(log, "[tv] cannot forward library logs"; "error" => format!("{}", error));
    }

    let vector = match run(&log, &config, &args) {
        Ok(vector) => vector,
        Err(error) => {
            error!(log, "[tv] failed"; "error" => format!("{}", error));
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&vector) {
        Ok(json) => println!("{}", json),
        Err(error) => {
            error!(log, "[tv] cannot serialize term vector"; "error" => format!("{}", error));
            process::exit(1);
        }
    }
}
