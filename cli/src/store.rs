use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cubesweeper_core::{BestTimeStore, Difficulty, MemoryBestTimes};

/// Best times kept in a JSON file, written back explicitly with [`JsonBestTimes::save`].
#[derive(Debug)]
pub struct JsonBestTimes {
    path: PathBuf,
    times: MemoryBestTimes,
}

impl JsonBestTimes {
    /// Loads the file, a missing file means no best times yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let times = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Could not read best times from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Malformed best times in {}", path.display()))?
        } else {
            log::debug!("No best times at {}, starting fresh", path.display());
            MemoryBestTimes::new()
        };
        Ok(Self { path, times })
    }

    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.times)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Could not write best times to {}", self.path.display()))?;
        log::debug!("Saved best times to {}", self.path.display());
        Ok(())
    }
}

impl BestTimeStore for JsonBestTimes {
    fn best_time(&self, difficulty: Difficulty) -> Option<Duration> {
        self.times.best_time(difficulty)
    }

    fn set_best_time(&mut self, difficulty: Difficulty, time: Duration) {
        self.times.set_best_time(difficulty, time);
    }
}
