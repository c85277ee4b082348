use std::path::PathBuf;

/// Runtime configuration, loaded once at startup and passed to each tool.
///
/// Replaces the pile of module-level constants the tools would otherwise
/// share. All fields have defaults suitable for a local run; override via
/// environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storefront name used in email copy (default: `SellBuddy`).
    pub store_name: String,
    /// Address that receives store notifications.
    pub store_email: String,
    /// Address supplier fulfillment requests are addressed to.
    pub supplier_email: String,
    /// Support address printed in customer emails.
    pub support_email: String,
    /// Unsplash API key; without it the fetcher falls back to the
    /// redirect-based Source endpoint.
    pub unsplash_access_key: Option<String>,
    /// Pexels API key; without it the Pexels provider is skipped.
    pub pexels_api_key: Option<String>,
    /// Where the orders store and image catalog are written.
    pub data_dir: PathBuf,
    /// Where generated marketing content is written.
    pub content_dir: PathBuf,
    /// Where the HTML gallery is written.
    pub reports_dir: PathBuf,
    /// Where downloaded image files are written.
    pub images_dir: PathBuf,
    /// Per-request HTTP timeout in seconds (default: `10`).
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_name: "SellBuddy".into(),
            store_email: "orders@sellbuddy.example".into(),
            supplier_email: "supplier@aliexpress-seller.example".into(),
            support_email: "support@sellbuddy.example".into(),
            unsplash_access_key: None,
            pexels_api_key: None,
            data_dir: PathBuf::from("data"),
            content_dir: PathBuf::from("content"),
            reports_dir: PathBuf::from("reports"),
            images_dir: PathBuf::from("images"),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                              |
    /// |-----------------------|--------------------------------------|
    /// | `STORE_NAME`          | `SellBuddy`                          |
    /// | `STORE_EMAIL`         | `orders@sellbuddy.example`           |
    /// | `SUPPLIER_EMAIL`      | `supplier@aliexpress-seller.example` |
    /// | `SUPPORT_EMAIL`       | `support@sellbuddy.example`          |
    /// | `UNSPLASH_ACCESS_KEY` | unset                                |
    /// | `PEXELS_API_KEY`      | unset                                |
    /// | `DATA_DIR`            | `data`                               |
    /// | `CONTENT_DIR`         | `content`                            |
    /// | `REPORTS_DIR`         | `reports`                            |
    /// | `IMAGES_DIR`          | `images`                             |
    /// | `HTTP_TIMEOUT_SECS`   | `10`                                 |
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let var = |name: &str| std::env::var(name).ok().filter(|s| !s.is_empty());

        Self {
            store_name: var("STORE_NAME").unwrap_or(defaults.store_name),
            store_email: var("STORE_EMAIL").unwrap_or(defaults.store_email),
            supplier_email: var("SUPPLIER_EMAIL").unwrap_or(defaults.supplier_email),
            support_email: var("SUPPORT_EMAIL").unwrap_or(defaults.support_email),
            unsplash_access_key: var("UNSPLASH_ACCESS_KEY"),
            pexels_api_key: var("PEXELS_API_KEY"),
            data_dir: var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            content_dir: var("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.content_dir),
            reports_dir: var("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            images_dir: var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            http_timeout_secs: var("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Root every output directory under `root`. Used by the tests and by
    /// anyone who wants the artifacts in one place.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            content_dir: root.join("content"),
            reports_dir: root.join("reports"),
            images_dir: root.join("images"),
            ..Config::default()
        }
    }
}
