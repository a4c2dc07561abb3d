use tracing::{info, warn};

use crate::store::KvStore;

/// Fixed key the best WPM is stored under
pub const BEST_KEY: &str = "typing_best_wpm_v1";

/// Parse a stored best score; anything that is not a non-negative integer reads as zero
pub fn parse_best(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

/// Cached best WPM backed by a key-value store.
///
/// Store failures never surface: reads degrade to zero and failed writes
/// keep the in-memory value.
pub struct BestScore {
    store: Box<dyn KvStore>,
    cached: u32,
}

impl BestScore {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        let mut best = Self { store, cached: 0 };
        best.load();
        best
    }

    /// Re-read the persisted value into the cache
    pub fn load(&mut self) -> u32 {
        self.cached = match self.store.get(BEST_KEY) {
            Ok(raw) => parse_best(raw.as_deref()),
            Err(err) => {
                warn!(error = %err, "failed to read best score, treating as 0");
                0
            }
        };
        self.cached
    }

    pub fn current(&self) -> u32 {
        self.cached
    }

    /// Persist `wpm` if it beats the current best. Returns true on improvement.
    pub fn save(&mut self, wpm: u32) -> bool {
        if wpm <= self.cached {
            return false;
        }
        let previous = self.cached;
        self.cached = wpm;
        if let Err(err) = self.store.set(BEST_KEY, &wpm.to_string()) {
            warn!(error = %err, wpm, "failed to persist best score");
        }
        info!(previous, wpm, "new best score");
        true
    }

    /// Reset both the persisted value and the cache to zero
    pub fn clear(&mut self) {
        if let Err(err) = self.store.remove(BEST_KEY) {
            warn!(error = %err, "failed to clear persisted best score");
        }
        self.cached = 0;
        info!("best score reset");
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore")
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}
