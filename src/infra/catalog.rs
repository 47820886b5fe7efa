//! Loads the shipping catalog from the embedded asset, a file or a URL.

use std::{
    collections::HashSet,
    fmt, fs,
    path::PathBuf,
    time::SystemTime,
};

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{CATALOG_ENV, HTTP_TIMEOUT};
use crate::domain::{CatalogDocument, ShippingOption};
use crate::infra::cache::{load_catalog_cache, save_catalog_cache, CatalogCache};
use crate::util::{assets, version};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file unreadable: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("embedded catalog missing")]
    MissingEmbedded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Remote(Url),
}

impl CatalogSource {
    /// Reads the source from `PUNK_SHIPPING_CATALOG`, falling back to the embedded catalog.
    pub fn from_env() -> Result<Self, CatalogError> {
        match std::env::var(CATALOG_ENV) {
            Ok(value) => Self::resolve(&value),
            Err(_) => Ok(CatalogSource::Embedded),
        }
    }

    pub fn resolve(value: &str) -> Result<Self, CatalogError> {
        let value = value.trim();
        if value.is_empty() {
            Ok(CatalogSource::Embedded)
        } else if value.starts_with("http://") || value.starts_with("https://") {
            Ok(CatalogSource::Remote(Url::parse(value)?))
        } else {
            Ok(CatalogSource::File(PathBuf::from(value)))
        }
    }

    pub fn label(&self) -> String {
        match self {
            CatalogSource::Embedded => "eingebettet".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Remote(url) => url.to_string(),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct LoadedCatalog {
    pub options: Vec<ShippingOption>,
    pub source: CatalogSource,
    pub fetched_at: Option<SystemTime>,
    pub status: CacheStatus,
}

/// Parses a catalog document, skipping entries that cannot be used.
///
/// An entry is dropped when it does not deserialize, has an empty `internal_name`
/// or repeats an `internal_name` seen earlier.
pub fn parse_catalog(json: &[u8]) -> Result<Vec<ShippingOption>, CatalogError> {
    let document: CatalogDocument = serde_json::from_slice(json)?;
    Ok(options_from_items(document.items))
}

fn options_from_items(items: Vec<serde_json::Value>) -> Vec<ShippingOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let option = match serde_json::from_value::<ShippingOption>(item) {
            Ok(option) => option,
            Err(e) => {
                warn!(index, "skipping malformed catalog entry: {e}");
                continue;
            }
        };
        if option.internal_name.trim().is_empty() {
            warn!(index, "skipping catalog entry without internal_name");
            continue;
        }
        if !seen.insert(option.internal_name.clone()) {
            warn!(index, name = %option.internal_name, "skipping duplicate catalog entry");
            continue;
        }
        options.push(option);
    }
    options
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
}

impl CatalogClient {
    pub fn new() -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(version::user_agent())
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetches `url`, serving the disk cache while it is fresh and as a
    /// fallback when the download fails.
    pub async fn fetch(&self, url: &Url, force: bool) -> Result<LoadedCatalog, CatalogError> {
        let cached = load_catalog_cache(url.as_str());
        if let Some(cache) = cached.as_ref().filter(|cache| !force && !cache.is_expired()) {
            info!(age = %cache.age_string(), "using cached catalog");
            return Ok(self.loaded_from(url, cache.clone(), CacheStatus::Cached));
        }

        match self.download(url).await {
            Ok(items) => {
                let cache = CatalogCache::new(url.as_str(), items);
                if let Err(e) = save_catalog_cache(&cache) {
                    warn!("failed to save catalog cache: {e}");
                }
                Ok(self.loaded_from(url, cache, CacheStatus::Fresh))
            }
            Err(error) => match cached {
                Some(stale) => {
                    warn!(
                        age = %stale.age_string(),
                        "catalog download failed, serving stale cache: {error}"
                    );
                    Ok(self.loaded_from(url, stale, CacheStatus::Stale))
                }
                None => Err(error),
            },
        }
    }

    async fn download(&self, url: &Url) -> Result<Vec<serde_json::Value>, CatalogError> {
        let document = self
            .http
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<CatalogDocument>()
            .await?;
        Ok(document.items)
    }

    fn loaded_from(&self, url: &Url, cache: CatalogCache, status: CacheStatus) -> LoadedCatalog {
        let fetched_at = Some(cache.cached_time());
        LoadedCatalog {
            options: options_from_items(cache.items),
            source: CatalogSource::Remote(url.clone()),
            fetched_at,
            status,
        }
    }
}

/// Loads the catalog from `source`. `force` bypasses a fresh disk cache.
pub async fn load_catalog(
    source: CatalogSource,
    force: bool,
) -> Result<LoadedCatalog, CatalogError> {
    let loaded = match &source {
        CatalogSource::Embedded => {
            let bytes = assets::embedded_catalog().ok_or(CatalogError::MissingEmbedded)?;
            LoadedCatalog {
                options: parse_catalog(&bytes)?,
                source: source.clone(),
                fetched_at: None,
                status: CacheStatus::Fresh,
            }
        }
        CatalogSource::File(path) => {
            let bytes = fs::read(path)?;
            LoadedCatalog {
                options: parse_catalog(&bytes)?,
                source: source.clone(),
                fetched_at: Some(SystemTime::now()),
                status: CacheStatus::Fresh,
            }
        }
        CatalogSource::Remote(url) => CatalogClient::new()?.fetch(url, force).await?,
    };

    info!(
        source = %loaded.source,
        entries = loaded.options.len(),
        status = ?loaded.status,
        "catalog loaded"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_sources() {
        assert_eq!(CatalogSource::resolve("").unwrap(), CatalogSource::Embedded);
        assert_eq!(
            CatalogSource::resolve("/tmp/catalog.json").unwrap(),
            CatalogSource::File(PathBuf::from("/tmp/catalog.json"))
        );
        assert!(matches!(
            CatalogSource::resolve("https://example.org/catalog.json").unwrap(),
            CatalogSource::Remote(_)
        ));
        assert!(matches!(
            CatalogSource::resolve("http://"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let json = br#"{"items": [
            {"internal_name": "ok", "company": "DHL", "price": "4,99"},
            {"company": "no name"},
            {"internal_name": "", "company": "empty"},
            {"internal_name": "ok", "company": "duplicate"},
            "not an object",
            {"internal_name": "numeric", "price": 3}
        ]}"#;
        let options = parse_catalog(json).unwrap();
        let names: Vec<&str> = options.iter().map(|o| o.internal_name.as_str()).collect();
        assert_eq!(names, vec!["ok", "numeric"]);
        assert_eq!(options[0].company, "DHL");
        assert_eq!(options[1].price, "3");
    }

    #[test]
    fn document_without_items_is_empty() {
        assert!(parse_catalog(b"{}").unwrap().is_empty());
        assert!(matches!(parse_catalog(b"nope"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn embedded_catalog_parses() {
        let bytes = assets::embedded_catalog().unwrap();
        let options = parse_catalog(&bytes).unwrap();
        assert!(options.len() >= 10);
        assert!(options.iter().all(|o| !o.internal_name.is_empty()));
        for special in [
            "gls_pack_xl",
            "deutschepost_brief_maxi_doppelt_lbh",
            "hermes_paket_xxl_haustuer",
        ] {
            assert!(options.iter().any(|o| o.internal_name == special), "{special}");
        }
    }

    #[tokio::test]
    async fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("punk-catalog-{}.json", std::process::id()));
        fs::write(&path, r#"{"items":[{"internal_name":"x","company":"GLS","price":"1"}]}"#).unwrap();

        let loaded = load_catalog(CatalogSource::File(path.clone()), false).await.unwrap();
        assert_eq!(loaded.options.len(), 1);
        assert_eq!(loaded.source, CatalogSource::File(path.clone()));

        fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/catalog.json"));
        let result = load_catalog(source, false).await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
