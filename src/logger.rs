use log;
use slog::Logger;


/// Passes records from the `log` facade, used by the library crates, on to
/// the slog logger
struct SlogForwarder {
    log: Logger,
    level: log::LevelFilter,
}


impl log::Log for SlogForwarder {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let target = record.target();
        match record.level() {
            log::Level::Error => error!(self.log, "{}", record.args(); "target" => target),
            log::Level::Warn => warn!(self.log, "{}", record.args(); "target" => target),
            log::Level::Info => info!(self.log, "{}", record.args(); "target" => target),
            log::Level::Debug => debug!(self.log, "{}", record.args(); "target" => target),
            log::Level::Trace => trace!(self.log, "{}", record.args(); "target" => target),
        }
    }

    fn flush(&self) {}
}


pub fn init(log: Logger, level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(SlogForwarder {
        log: log,
        level: level,
    }))?;
    log::set_max_level(level);
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use log::{self, Log};
    use slog::{self, Drain, Logger};

    use super::SlogForwarder;

    struct CaptureDrain {
        records: Arc<Mutex<Vec<(slog::Level, String)>>>,
    }

    impl Drain for CaptureDrain {
        type Ok = ();
        type Err = slog::Never;

        fn log(&self, record: &slog::Record, _values: &slog::OwnedKVList) -> Result<(), slog::Never> {
            self.records.lock().unwrap().push((record.level(), format!("{}", record.msg())));
            Ok(())
        }
    }

    fn make_forwarder(level: log::LevelFilter) -> (SlogForwarder, Arc<Mutex<Vec<(slog::Level, String)>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let drain = CaptureDrain {
            records: records.clone(),
        };

        let forwarder = SlogForwarder {
            log: Logger::root(drain.fuse(), o!()),
            level: level,
        };

        (forwarder, records)
    }

    #[test]
    fn test_forwards_records() {
        let (forwarder, records) = make_forwarder(log::LevelFilter::Debug);

        forwarder.log(&log::Record::builder()
            .args(format_args!("fetched {} rows", 3))
            .level(log::Level::Warn)
            .target("termvec_rowstore::postings")
            .build());

        assert_eq!(*records.lock().unwrap(), vec![(slog::Level::Warning, "fetched 3 rows".to_string())]);
    }

    #[test]
    fn test_filters_by_level() {
        let (forwarder, records) = make_forwarder(log::LevelFilter::Info);

        forwarder.log(&log::Record::builder()
            .args(format_args!("too detailed"))
            .level(log::Level::Debug)
            .build());

        assert!(!forwarder.enabled(&log::Metadata::builder().level(log::Level::Trace).build()));
        assert!(forwarder.enabled(&log::Metadata::builder().level(log::Level::Error).build()));
        assert!(records.lock().unwrap().is_empty());
    }
}
