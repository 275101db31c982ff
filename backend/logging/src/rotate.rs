//! Size-rotated log file on top of `logroller`.
//!
//! `logroller` owns rotation and the backup count. It has no age limit for
//! size-based rotation, so rotated files older than `max_age_days` are
//! removed here by modification time, on open and then at most once an hour.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use logroller::{LogRoller, LogRollerBuilder, Rotation, RotationSize, TimeZone};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Rotation limits shared by every log file of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size limit of the active file, in megabytes. Must be positive.
    pub max_size_mb: i64,
    /// Backups older than this are deleted. Non-positive disables the rule.
    pub max_age_days: i64,
    /// Number of backups kept. Non-positive keeps all of them.
    pub max_backups: i64,
    /// Rotate on local time rather than UTC.
    pub local_time: bool,
}

impl RotationPolicy {
    fn rotation(&self) -> io::Result<Rotation> {
        u64::try_from(self.max_size_mb)
            .ok()
            .filter(|mb| *mb > 0)
            .map(|mb| Rotation::SizeBased(RotationSize::MB(mb)))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("max size must be positive, got {} MB", self.max_size_mb),
                )
            })
    }

    fn keep_files(&self) -> u64 {
        u64::try_from(self.max_backups)
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(u64::MAX)
    }

    fn max_age(&self) -> Option<Duration> {
        u64::try_from(self.max_age_days)
            .ok()
            .filter(|days| *days > 0)
            .and_then(|days| days.checked_mul(SECONDS_PER_DAY))
            .map(Duration::from_secs)
    }

    fn time_zone(&self) -> TimeZone {
        if self.local_time {
            TimeZone::Local
        } else {
            TimeZone::UTC
        }
    }
}

/// One rotating log file. Every write is flushed before returning.
pub(crate) struct RollingFile {
    roller: LogRoller,
    dir: PathBuf,
    file_name: String,
    max_age: Option<Duration>,
    last_prune: Instant,
}

impl RollingFile {
    /// Open `dir/file_name` for appending, creating the file right away.
    pub(crate) fn open(dir: &Path, file_name: &str, policy: RotationPolicy) -> io::Result<Self> {
        let rotation = policy.rotation()?;
        let dir_name = dir.to_string_lossy();
        let roller = LogRollerBuilder::new(&*dir_name, file_name)
            .rotation(rotation)
            .time_zone(policy.time_zone())
            .max_keep_files(policy.keep_files())
            .build()
            .map_err(|e| io::Error::other(e.to_string()))?;

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(file_name))?;

        let file = Self {
            roller,
            dir: dir.to_path_buf(),
            file_name: file_name.to_string(),
            max_age: policy.max_age(),
            last_prune: Instant::now(),
        };
        file.prune_expired()?;
        Ok(file)
    }

    /// Whether `name` is a rotated copy of this file, e.g. `info.log.1`.
    fn is_backup(&self, name: &str) -> bool {
        let stem = self
            .file_name
            .split_once('.')
            .map_or(self.file_name.as_str(), |(stem, _)| stem);
        name != self.file_name && name.strip_prefix(stem).is_some_and(|rest| rest.starts_with('.'))
    }

    fn prune_expired(&self) -> io::Result<()> {
        let Some(cutoff) = self
            .max_age
            .and_then(|age| SystemTime::now().checked_sub(age))
        else {
            return Ok(());
        };

        for dir_entry in fs::read_dir(&self.dir)? {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name();
            if !name.to_str().is_some_and(|name| self.is_backup(name)) {
                continue;
            }
            let metadata = dir_entry.metadata()?;
            if metadata.is_file() && metadata.modified()? < cutoff {
                match fs::remove_file(dir_entry.path()) {
                    Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.roller.write(buf)?;
        self.roller.flush()?;
        if self.last_prune.elapsed() >= PRUNE_INTERVAL {
            self.last_prune = Instant::now();
            self.prune_expired()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.roller.flush()
    }
}
