//! REST client for the remote catalog/cart store.
//!
//! Talks to a PostgREST-style row API with `reqwest`. The product catalog is
//! cached with `moka` (TTL from configuration); cart rows are never cached
//! because they are mutable per-user state.

use std::num::NonZeroU32;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use stylehub_core::{Category, CartEntry, CurrencyCode, Price, Product, ProductId, UserId};

use super::{CartStore, CatalogStore, StoreError};
use crate::config::StoreConfig;

const CATALOG_CACHE_KEY: &str = "products";

/// Client for the remote store's REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct RestStoreClient {
    inner: Arc<RestStoreClientInner>,
}

struct RestStoreClientInner {
    client: reqwest::Client,
    products_url: Url,
    cart_items_url: Url,
    api_key: String,
    catalog_cache: Cache<String, Arc<Vec<Product>>>,
}

impl RestStoreClient {
    /// Create a new store client.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the configured base URL cannot be
    /// extended with the table paths (e.g., a cannot-be-a-base URL).
    pub fn new(config: &StoreConfig) -> Result<Self, url::ParseError> {
        let catalog_cache = Cache::builder()
            .max_capacity(10)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        // A trailing slash keeps Url::join from dropping the last path segment
        let mut base = config.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        Ok(Self {
            inner: Arc::new(RestStoreClientInner {
                client: reqwest::Client::new(),
                products_url: base.join("products")?,
                cart_items_url: base.join("cart_items")?,
                api_key: config.api_key.expose_secret().to_string(),
                catalog_cache,
            }),
        })
    }

    /// Attach auth headers to a request.
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.inner.api_key)
            .header("Authorization", format!("Bearer {}", self.inner.api_key))
    }

    /// Check a response for rate limiting and non-success statuses, returning
    /// the body text on success.
    async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(StoreError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Store returned non-success status"
            );
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }

    /// Parse a JSON body, logging a snippet on failure for diagnostics.
    fn parse_rows<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, StoreError> {
        serde_json::from_str(body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse store response"
            );
            StoreError::Parse(e)
        })
    }

    /// Drop the cached catalog so the next fetch hits the store.
    pub async fn invalidate_catalog(&self) {
        self.inner
            .catalog_cache
            .invalidate(CATALOG_CACHE_KEY)
            .await;
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Product row as the store serves it.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    #[serde(default)]
    currency_code: CurrencyCode,
    image_url: String,
    category: Category,
    stock_quantity: u32,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, StoreError> {
        let price = Price::new(row.price, row.currency_code)
            .map_err(|e| StoreError::MalformedRow(format!("product {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            image_url: row.image_url,
            category: row.category,
            stock_quantity: row.stock_quantity,
            created_at: row.created_at,
        })
    }
}

/// Body for a quantity-only PATCH.
#[derive(Debug, Serialize)]
struct QuantityPatch {
    quantity: NonZeroU32,
}

// =============================================================================
// Store Trait Implementations
// =============================================================================

impl CatalogStore for RestStoreClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        if let Some(products) = self.inner.catalog_cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products.as_ref().clone());
        }

        let response = self
            .authed(self.inner.client.get(self.inner.products_url.clone()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let rows: Vec<ProductRow> = Self::parse_rows(&body)?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY.to_string(), Arc::new(products.clone()))
            .await;

        Ok(products)
    }
}

impl CartStore for RestStoreClient {
    #[instrument(skip(self), fields(user_id = %user))]
    async fn list_cart_entries(&self, user: UserId) -> Result<Vec<CartEntry>, StoreError> {
        let user_filter = format!("eq.{user}");
        let response = self
            .authed(self.inner.client.get(self.inner.cart_items_url.clone()))
            .query(&[
                ("select", "user_id,product_id,quantity"),
                ("user_id", user_filter.as_str()),
            ])
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        Self::parse_rows(&body)
    }

    #[instrument(skip(self), fields(user_id = %user, product_id = %product))]
    async fn upsert_cart_entry(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError> {
        let entry = CartEntry {
            user_id: user,
            product_id: product,
            quantity,
        };

        let response = self
            .authed(self.inner.client.post(self.inner.cart_items_url.clone()))
            // Overwrite an existing (user, product) row instead of failing on
            // the unique constraint
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[entry])
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user, product_id = %product))]
    async fn update_cart_entry_quantity(
        &self,
        user: UserId,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<(), StoreError> {
        let response = self
            .authed(self.inner.client.patch(self.inner.cart_items_url.clone()))
            .query(&[
                ("user_id", format!("eq.{user}")),
                ("product_id", format!("eq.{product}")),
            ])
            .json(&QuantityPatch { quantity })
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user, product_id = %product))]
    async fn delete_cart_entry(&self, user: UserId, product: ProductId) -> Result<(), StoreError> {
        let response = self
            .authed(self.inner.client.delete(self.inner.cart_items_url.clone()))
            .query(&[
                ("user_id", format!("eq.{user}")),
                ("product_id", format!("eq.{product}")),
            ])
            .send()
            .await?;

        Self::read_body(response).await?;
        Ok(())
    }
}
