// src/pipeline/logging.rs
//
// Per-run logger wiring. Records go to stderr and to a log file named
// after the run, in the `timestamp - LEVEL: message` format. The `log`
// facade is process-global, so the harness calls this exactly once per
// run; a second call fails.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use env_logger::{Env, Target};

use crate::config::ensure_directory;
use crate::error::Result;

/// Initialize logging for one run. Returns the log file path.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging(run_id: &str, log_dir: &Path) -> Result<PathBuf> {
    ensure_directory(log_dir)?;
    let log_path = log_dir.join(format!("{}.log", run_id));
    let file = File::create(&log_path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(TeeWriter::new(file))))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(log_path)
}

/// Mirrors every write to stderr and the run's log file.
struct TeeWriter {
    file: File,
}

impl TeeWriter {
    fn new(file: File) -> Self {
        Self { file }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tee_writer_hits_file() {
        let dir = std::env::temp_dir().join("waveplot-tee-test");
        ensure_directory(&dir).unwrap();
        let path = dir.join("tee.log");
        let mut tee = TeeWriter::new(File::create(&path).unwrap());
        tee.write_all(b"2024-01-01 00:00:00 - INFO: hello\n").unwrap();
        tee.flush().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("INFO: hello"));
    }
}
