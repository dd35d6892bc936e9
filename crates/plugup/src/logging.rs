use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Once the log outgrows `max_bytes`, keeps only the newest whole lines that
/// fit in half of it.
fn cap_log_file(path: &Path, max_bytes: u64) -> io::Result<()> {
    if std::fs::metadata(path)?.len() <= max_bytes {
        return Ok(());
    }

    let contents = std::fs::read(path)?;
    let budget = usize::try_from(max_bytes / 2).unwrap_or(usize::MAX);
    let cut = contents.len().saturating_sub(budget);
    let keep_from = contents[cut..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(contents.len(), |pos| cut + pos + 1);
    std::fs::write(path, &contents[keep_from..])
}

fn open_log_file(path: &Path, max_bytes: u64) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match cap_log_file(path, max_bytes) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Logs to stderr and, when a path is given, appends to a size-capped file.
///
/// Stdout is left alone so command output can be piped as JSON.
pub fn init_logging(log_path: Option<&Path>, verbose: bool, max_log_size: u64) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("plugup")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Debug,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(log_path) = log_path {
        match open_log_file(log_path, max_log_size) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)),
            Err(e) => eprintln!("plugup: debug log {} unavailable: {e}", log_path.display()),
        }
    }

    let _ = CombinedLogger::init(loggers);

    set_verbose(verbose);

    if let Some(log_path) = log_path {
        log::debug!("Logging initialized, log file: {}", log_path.display());
    }
}

pub fn set_verbose(verbose: bool) {
    if verbose {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::{cap_log_file, open_log_file, set_verbose};

    #[test]
    fn cap_keeps_newest_whole_lines() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("debug.log");
        std::fs::write(&log_path, "scan-1\nscan-2\nscan-3\nscan-4\nscan-5\n")
            .expect("test log file should be written");

        cap_log_file(&log_path, 20).expect("oversized log should be capped");

        let capped = std::fs::read_to_string(&log_path).expect("capped log should be readable");
        assert_eq!(capped, "scan-5\n");
    }

    #[test]
    fn cap_leaves_small_files_alone() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("debug.log");
        std::fs::write(&log_path, "short\n").expect("test log file should be written");

        cap_log_file(&log_path, 1024).expect("small log should be left alone");

        let contents = std::fs::read_to_string(&log_path).expect("log file should be readable");
        assert_eq!(contents, "short\n");
    }

    #[test]
    fn open_log_file_creates_missing_directories_and_appends() {
        use std::io::Write as _;

        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let log_path = temp_dir.path().join("state/plugup/debug.log");

        let mut first = open_log_file(&log_path, 1024).expect("log file should open");
        first.write_all(b"first\n").expect("write should succeed");
        drop(first);
        let mut second = open_log_file(&log_path, 1024).expect("log file should reopen");
        second.write_all(b"second\n").expect("write should succeed");
        drop(second);

        let contents = std::fs::read_to_string(&log_path).expect("log file should be readable");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn set_verbose_updates_global_level() {
        set_verbose(true);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        set_verbose(false);
        assert_eq!(log::max_level(), log::LevelFilter::Info);
    }
}
