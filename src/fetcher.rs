//! Product image fetcher.
//!
//! For each product, issues sequential search requests per query across two
//! providers (Unsplash, Pexels), collects results in arrival order,
//! deduplicates by exact URL, and keeps the first 10 unique images per
//! product. Lorem Picsum supplies keyless placeholder URLs when a product
//! comes back empty.
//!
//! Network failures are caught per request, logged, and skipped. There is no
//! retry or backoff; every call blocks the caller with a fixed timeout.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::products::Product;

/// Hard cap on unique images kept per product.
pub const MAX_IMAGES_PER_PRODUCT: usize = 10;
/// How many images the gallery shows per product.
const GALLERY_IMAGES_PER_PRODUCT: usize = 5;

const UNSPLASH_SOURCE_URL: &str = "https://source.unsplash.com";
const UNSPLASH_API_URL: &str = "https://api.unsplash.com/search/photos";
const PEXELS_API_URL: &str = "https://api.pexels.com/v1/search";
const PICSUM_URL: &str = "https://picsum.photos";

const UNSPLASH_PER_QUERY: usize = 2;
const PEXELS_PER_QUERY: usize = 1;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// One image found for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub width: u32,
    pub height: u32,
    pub source: String,
    pub attribution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// The persisted image catalog:
/// `{generated, products: {id: [image...]}, total_images}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageCatalog {
    pub generated: DateTime<Utc>,
    pub products: BTreeMap<String, Vec<ProductImage>>,
    pub total_images: usize,
}

impl ImageCatalog {
    pub fn new(products: BTreeMap<String, Vec<ProductImage>>) -> Self {
        let total_images = products.values().map(Vec::len).sum();
        ImageCatalog {
            generated: Utc::now(),
            products,
            total_images,
        }
    }
}

// ---- provider response shapes ----

#[derive(Deserialize)]
struct UnsplashSearchResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
    width: u32,
    height: u32,
    user: UnsplashUser,
    links: UnsplashLinks,
}

#[derive(Deserialize)]
struct UnsplashUrls {
    regular: String,
    thumb: String,
}

#[derive(Deserialize)]
struct UnsplashUser {
    name: String,
}

#[derive(Deserialize)]
struct UnsplashLinks {
    download: String,
}

#[derive(Deserialize)]
struct PexelsSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Deserialize)]
struct PexelsPhoto {
    src: PexelsSrc,
    width: u32,
    height: u32,
    photographer: String,
}

#[derive(Deserialize)]
struct PexelsSrc {
    large: String,
    tiny: String,
}

/// Remove duplicate images by exact URL match, preserving first-seen order.
pub fn dedup_by_url(images: Vec<ProductImage>) -> Vec<ProductImage> {
    let mut seen = HashSet::new();
    images
        .into_iter()
        .filter(|img| seen.insert(img.url.clone()))
        .collect()
}

pub struct ImageFetcher {
    client: Client,
    unsplash_access_key: Option<String>,
    pexels_api_key: Option<String>,
}

impl ImageFetcher {
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(ImageFetcher {
            client,
            unsplash_access_key: config.unsplash_access_key.clone(),
            pexels_api_key: config.pexels_api_key.clone(),
        })
    }

    /// Fetch via the keyless Unsplash Source endpoint: each HEAD request
    /// redirects to a random image matching the query, and the final URL is
    /// the result.
    async fn fetch_unsplash_source(&self, query: &str, count: usize) -> Vec<ProductImage> {
        let mut images = Vec::new();
        for i in 0..count {
            let url = format!(
                "{}/800x800/?{}&sig={}",
                UNSPLASH_SOURCE_URL,
                urlencoding::encode(query),
                i
            );
            match self.client.head(&url).send().await {
                Ok(resp) => {
                    let final_url = resp.url().to_string();
                    info!(query, url = %final_url, "unsplash source hit");
                    images.push(ProductImage {
                        url: final_url,
                        thumbnail: None,
                        query: Some(query.to_owned()),
                        width: 800,
                        height: 800,
                        source: "unsplash".into(),
                        attribution: "Photo from Unsplash".into(),
                        download_url: None,
                    });
                }
                Err(e) => warn!(query, error = %e, "unsplash source request failed, skipping"),
            }
        }
        images
    }

    /// Fetch from the authenticated Unsplash search API, falling back to the
    /// Source endpoint when no key is configured or the request fails.
    async fn fetch_unsplash(&self, query: &str, count: usize) -> Vec<ProductImage> {
        let Some(key) = &self.unsplash_access_key else {
            return self.fetch_unsplash_source(query, count).await;
        };

        let req = self
            .client
            .get(UNSPLASH_API_URL)
            .header("Authorization", format!("Client-ID {}", key))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "squarish"),
            ]);

        let parsed = async {
            req.send()
                .await?
                .error_for_status()?
                .json::<UnsplashSearchResponse>()
                .await
        }
        .await;

        match parsed {
            Ok(data) => data
                .results
                .into_iter()
                .map(|photo| ProductImage {
                    url: photo.urls.regular,
                    thumbnail: Some(photo.urls.thumb),
                    query: Some(query.to_owned()),
                    width: photo.width,
                    height: photo.height,
                    source: "unsplash".into(),
                    attribution: format!("Photo by {} on Unsplash", photo.user.name),
                    download_url: Some(photo.links.download),
                })
                .collect(),
            Err(e) => {
                warn!(query, error = %e, "unsplash API failed, falling back to source");
                self.fetch_unsplash_source(query, count).await
            }
        }
    }

    /// Fetch from the Pexels search API; skipped entirely without a key.
    async fn fetch_pexels(&self, query: &str, count: usize) -> Vec<ProductImage> {
        let Some(key) = &self.pexels_api_key else {
            info!(query, "pexels API key not set, skipping");
            return Vec::new();
        };

        let req = self
            .client
            .get(PEXELS_API_URL)
            .header("Authorization", key)
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("size", "medium"),
            ]);

        let parsed = async {
            req.send()
                .await?
                .error_for_status()?
                .json::<PexelsSearchResponse>()
                .await
        }
        .await;

        match parsed {
            Ok(data) => data
                .photos
                .into_iter()
                .map(|photo| ProductImage {
                    url: photo.src.large,
                    thumbnail: Some(photo.src.tiny),
                    query: Some(query.to_owned()),
                    width: photo.width,
                    height: photo.height,
                    source: "pexels".into(),
                    attribution: format!("Photo by {} on Pexels", photo.photographer),
                    download_url: None,
                })
                .collect(),
            Err(e) => {
                warn!(query, error = %e, "pexels request failed, skipping");
                Vec::new()
            }
        }
    }

    /// Keyless placeholder URLs from Lorem Picsum. No request is made; the
    /// URLs themselves serve random images.
    pub fn picsum_placeholders(seed: &str, count: usize) -> Vec<ProductImage> {
        (0..count)
            .map(|i| ProductImage {
                url: format!("{}/800/800?random={}{}", PICSUM_URL, seed, i),
                thumbnail: None,
                query: None,
                width: 800,
                height: 800,
                source: "picsum".into(),
                attribution: "Photo from Lorem Picsum".into(),
                download_url: None,
            })
            .collect()
    }

    /// Fetch, dedup, and truncate images for one product.
    pub async fn fetch_product(&self, product: &Product) -> Vec<ProductImage> {
        let mut collected = Vec::new();
        for query in product.queries {
            info!(product = product.id, query, "searching");
            collected.extend(self.fetch_unsplash(query, UNSPLASH_PER_QUERY).await);
            collected.extend(self.fetch_pexels(query, PEXELS_PER_QUERY).await);
        }

        let mut unique = dedup_by_url(collected);
        if unique.is_empty() {
            warn!(product = product.id, "no provider results, using picsum placeholders");
            unique = Self::picsum_placeholders(product.id, GALLERY_IMAGES_PER_PRODUCT);
        }
        unique.truncate(MAX_IMAGES_PER_PRODUCT);
        info!(product = product.id, count = unique.len(), "unique images kept");
        unique
    }

    /// Fetch images for every product and assemble the catalog.
    pub async fn fetch_all(&self, products: &[Product]) -> ImageCatalog {
        let mut map = BTreeMap::new();
        for product in products {
            let images = self.fetch_product(product).await;
            map.insert(product.id.to_owned(), images);
        }
        ImageCatalog::new(map)
    }

    /// Download every catalogued image into `images_dir/{product_id}/`.
    /// Failures are logged and skipped.
    pub async fn download_all(
        &self,
        catalog: &ImageCatalog,
        images_dir: &Path,
    ) -> FetchResult<Vec<PathBuf>> {
        let mut downloaded = Vec::new();
        for (product_id, images) in &catalog.products {
            let product_dir = images_dir.join(product_id);
            std::fs::create_dir_all(&product_dir)?;

            for (i, img) in images.iter().enumerate() {
                let fetched = async {
                    self.client
                        .get(&img.url)
                        .send()
                        .await?
                        .error_for_status()?
                        .bytes()
                        .await
                }
                .await;
                match fetched {
                    Ok(bytes) => {
                        let path = product_dir.join(format!("{}_{}.jpg", product_id, i + 1));
                        std::fs::write(&path, &bytes)?;
                        info!(path = %path.display(), "downloaded");
                        downloaded.push(path);
                    }
                    Err(e) => warn!(url = %img.url, error = %e, "download failed, skipping"),
                }
            }
        }
        Ok(downloaded)
    }
}

/// Persist the catalog JSON under `data_dir/product_images.json`.
pub fn save_catalog(catalog: &ImageCatalog, data_dir: &Path) -> FetchResult<PathBuf> {
    std::fs::create_dir_all(data_dir)?;
    let path = data_dir.join("product_images.json");
    std::fs::write(&path, serde_json::to_string_pretty(catalog)?)?;
    Ok(path)
}

fn title_case(slug: &str) -> String {
    slug.split('-')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the HTML gallery: one section per product, first few images each.
pub fn render_gallery(catalog: &ImageCatalog) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>SellBuddy Product Images</title>
    <style>
        body { font-family: Arial; padding: 20px; background: #f5f5f5; }
        h1 { color: #6366f1; }
        .product { margin: 30px 0; padding: 20px; background: white; border-radius: 12px; }
        .images { display: flex; flex-wrap: wrap; gap: 10px; }
        .images img { width: 200px; height: 200px; object-fit: cover; border-radius: 8px; }
        .attribution { font-size: 12px; color: #666; }
    </style>
</head>
<body>
    <h1>Product Image Gallery</h1>
"#,
    );

    for (product_id, images) in &catalog.products {
        html.push_str(&format!(
            "<div class=\"product\"><h2>{}</h2><div class=\"images\">",
            title_case(product_id)
        ));
        for img in images.iter().take(GALLERY_IMAGES_PER_PRODUCT) {
            html.push_str(&format!(
                "<div><img src=\"{}\" alt=\"{}\"><p class=\"attribution\">{}</p></div>",
                img.url, product_id, img.attribution
            ));
        }
        html.push_str("</div></div>");
    }

    html.push_str("</body></html>");
    html
}

/// Write the gallery under `reports_dir/image_gallery.html`.
pub fn save_gallery(catalog: &ImageCatalog, reports_dir: &Path) -> FetchResult<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    let path = reports_dir.join("image_gallery.html");
    std::fs::write(&path, render_gallery(catalog))?;
    Ok(path)
}
