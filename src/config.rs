//! Compile-time settings and the names of runtime overrides.

use std::time::Duration;

/// Catalog shipped inside the binary, relative to `assets/`.
pub const DATA_FILE: &str = "data/shipping-options.json";

/// Environment variable naming a catalog file path or `http(s)://` URL.
pub const CATALOG_ENV: &str = "PUNK_SHIPPING_CATALOG";

/// Typing pause before the input is committed and the results recompute.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(150);

pub const TOAST_DURATION: Duration = Duration::from_secs(3);
pub const MAX_TOASTS: usize = 5;

/// Base of generated share links.
pub const SHARE_BASE_URL: &str = "https://punk-shipping.app/";

/// Remote catalogs are refetched after this age.
pub const CATALOG_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Directory name below the platform data/config dirs.
pub const APP_DIR_NAME: &str = "punk-shipping";
