//! On-disk cache for remotely fetched catalogs, with TTL.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{APP_DIR_NAME, CATALOG_CACHE_TTL};

const CACHE_FILENAME: &str = "catalog_cache.json";

/// Raw catalog items as last fetched from a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCache {
    /// URL the items were fetched from. A cache for another URL is ignored.
    pub source_url: String,
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    pub items: Vec<serde_json::Value>,
}

impl CatalogCache {
    pub fn new(source_url: impl Into<String>, items: Vec<serde_json::Value>) -> Self {
        Self {
            source_url: source_url.into(),
            cached_at: unix_now(),
            items,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age() > CATALOG_CACHE_TTL
    }

    pub fn age(&self) -> Duration {
        Duration::from_secs(unix_now().saturating_sub(self.cached_at))
    }

    pub fn cached_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.cached_at)
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        age_string(self.age())
    }
}

pub fn age_string(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn cache_path() -> PathBuf {
    let base = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME);
    ensure_dir(&base);
    base.join(CACHE_FILENAME)
}

/// Creates `dir` if needed. Returns whether it is usable.
fn ensure_dir(dir: &Path) -> bool {
    match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %dir.display(), "cannot create cache directory: {e}");
            false
        }
    }
}

/// Loads the cache for `source_url`, expired or not. Callers check [`CatalogCache::is_expired`].
pub fn load_catalog_cache(source_url: &str) -> Option<CatalogCache> {
    let path = cache_path();
    if !path.exists() {
        debug!(path = %path.display(), "no catalog cache");
        return None;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read catalog cache: {e}");
            return None;
        }
    };
    match serde_json::from_str::<CatalogCache>(&content) {
        Ok(cache) if cache.source_url == source_url => {
            debug!(
                entries = cache.items.len(),
                age = %cache.age_string(),
                "loaded catalog cache"
            );
            Some(cache)
        }
        Ok(cache) => {
            debug!(cached = %cache.source_url, "catalog cache belongs to another source");
            None
        }
        Err(e) => {
            warn!("failed to parse catalog cache: {e}");
            None
        }
    }
}

pub fn save_catalog_cache(cache: &CatalogCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string(cache)?;
    fs::write(&path, content)?;
    info!(
        entries = cache.items.len(),
        path = %path.display(),
        "saved catalog cache"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_cache_is_not_expired() {
        let cache = CatalogCache::new("https://example.org/catalog.json", Vec::new());
        assert!(!cache.is_expired());
        assert!(cache.age() < Duration::from_secs(5));
    }

    #[test]
    fn old_cache_expires() {
        let mut cache = CatalogCache::new("https://example.org/catalog.json", Vec::new());
        cache.cached_at = unix_now() - CATALOG_CACHE_TTL.as_secs() - 10;
        assert!(cache.is_expired());
        assert_eq!(cache.age_string(), "1d");
    }

    #[test]
    fn age_strings_pick_largest_unit() {
        assert_eq!(age_string(Duration::from_secs(42)), "42s");
        assert_eq!(age_string(Duration::from_secs(125)), "2m");
        assert_eq!(age_string(Duration::from_secs(7300)), "2h");
    }

    #[test]
    fn cache_dir_below_a_file_is_reported_unusable() {
        let blocker = std::env::temp_dir().join(format!("punk-cache-blocker-{}", std::process::id()));
        fs::write(&blocker, b"not a directory").unwrap();

        assert!(!ensure_dir(&blocker.join("nested")));
        assert!(ensure_dir(&std::env::temp_dir()));

        fs::remove_file(&blocker).unwrap();
    }
}
