use std::path::PathBuf;

use log::LevelFilter;

#[derive(Debug, Default)]
pub(crate) struct LogSettings {
    /// Number of `-v` flags given.
    pub(crate) verbosity: u8,
    /// Copy of the log on disk.
    pub(crate) file: Option<PathBuf>,
}

impl LogSettings {
    pub(crate) fn level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub(crate) fn setup_logging(settings: LogSettings) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}]: {}", record.target(), message))
        })
        .level(settings.level())
        .chain(std::io::stderr());
    if let Some(path) = &settings.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }
    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let level = |verbosity| {
            LogSettings {
                verbosity,
                file: None,
            }
            .level()
        };
        assert_eq!(level(0), LevelFilter::Warn);
        assert_eq!(level(1), LevelFilter::Info);
        assert_eq!(level(2), LevelFilter::Debug);
        assert_eq!(level(9), LevelFilter::Trace);
    }
}
