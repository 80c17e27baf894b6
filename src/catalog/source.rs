//! Catalog sources: HTTP resource, local file, or in-memory list.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use url::Url;

use super::error::{CatalogError, CatalogResult};
use super::types::{Catalog, CatalogDocument, Product};
use crate::config::PickerConfig;

/// Boxed future type for catalog loading.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can produce the product catalog.
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the whole catalog.
    ///
    /// # Errors
    /// Returns an error if the resource is unreachable or malformed.
    fn load(&self) -> SourceFuture<'_, CatalogResult<Catalog>>;
}

/// Parse a `{ "products": [...] }` document.
///
/// # Errors
/// Returns [`CatalogError::Malformed`] if the text is not a catalog document.
pub fn parse_document(text: &str) -> CatalogResult<Catalog> {
    let doc: CatalogDocument = serde_json::from_str(text)?;
    Ok(Catalog::from(doc))
}

/// Fetches the catalog document over HTTP.
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for an explicit URL.
    #[must_use]
    pub const fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    /// Create a source from the configured base URL and catalog path.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &PickerConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()
            .map_err(|e| CatalogError::HttpClient(e.to_string()))?;
        Ok(Self::new(client, config.catalog_url()?))
    }
}

impl CatalogSource for HttpCatalogSource {
    fn load(&self) -> SourceFuture<'_, CatalogResult<Catalog>> {
        Box::pin(async move {
            tracing::debug!("Fetching catalog from {}", self.url);
            let response = self.client.get(self.url.clone()).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }

            let text = response.text().await?;
            parse_document(&text)
        })
    }
}

/// Reads the catalog document from disk.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> SourceFuture<'_, CatalogResult<Catalog>> {
        Box::pin(async move {
            tracing::debug!("Reading catalog from {}", self.path.display());
            let text = tokio::fs::read_to_string(&self.path).await?;
            parse_document(&text)
        })
    }
}

/// Serves a product list held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    /// Create a source over `products`.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> SourceFuture<'_, CatalogResult<Catalog>> {
        let catalog = Catalog::new(self.products.clone());
        Box::pin(async move { Ok(catalog) })
    }
}
