//! Barcode product lookup.
//!
//! The scan flow asks a [`ProductLookup`] for a product name and brand. The lookup
//! is a single request with no retry. Whatever goes wrong, [`resolve_product`]
//! hands back a placeholder so the user can still save the item.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{future::Future, time::Duration};
use tracing::{debug, instrument, warn};

/// Default Open Food Facts host.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://world.openfoodfacts.org";

const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Name and brand of a scanned product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Product name
    pub name: String,
    /// Brand, `"Unknown Brand"` when the source has none
    pub brand: String,
}

impl ProductInfo {
    /// Placeholder used when the barcode cannot be resolved.
    #[must_use]
    pub fn placeholder(barcode: &str) -> Self {
        Self {
            name: format!("Product {barcode}"),
            brand: UNKNOWN_BRAND.to_string(),
        }
    }
}

/// Source of product details for a barcode.
pub trait ProductLookup: Send + Sync {
    /// `Ok(None)` when the source does not know the barcode.
    fn lookup(&self, barcode: &str) -> impl Future<Output = Result<Option<ProductInfo>>> + Send;
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    product: Option<ProductFields>,
}

#[derive(Debug, Deserialize)]
struct ProductFields {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    brands: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Interprets an Open Food Facts v0 product response body.
pub fn parse_product_response(barcode: &str, body: &str) -> Result<Option<ProductInfo>> {
    let response: ProductResponse = serde_json::from_str(body)?;
    if response.status != 1 {
        return Ok(None);
    }
    Ok(response.product.map(|product| ProductInfo {
        name: non_empty(product.product_name).unwrap_or_else(|| format!("Product {barcode}")),
        brand: non_empty(product.brands).unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
    }))
}

/// [`ProductLookup`] against the Open Food Facts public API.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsLookup {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFactsLookup {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("foodprint/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, barcode: &str) -> String {
        format!("{}/api/v0/product/{barcode}.json", self.base_url)
    }
}

impl ProductLookup for OpenFoodFactsLookup {
    #[instrument(skip(self))]
    async fn lookup(&self, barcode: &str) -> Result<Option<ProductInfo>> {
        let url = self.product_url(barcode);
        debug!("Requesting {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_product_response(barcode, &body)
    }
}

/// Checks that a barcode is 8 to 14 ASCII digits (EAN-8 through GTIN-14).
///
/// # Errors
/// Returns `Error::InvalidInput` for anything else.
pub fn validate_barcode(raw: &str) -> Result<String> {
    let barcode = raw.trim();
    if (8..=14).contains(&barcode.len()) && barcode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(barcode.to_string())
    } else {
        Err(Error::InvalidInput {
            message: format!("'{raw}' is not a barcode (expected 8 to 14 digits)"),
        })
    }
}

/// Looks `barcode` up, falling back to [`ProductInfo::placeholder`] when the
/// product is unknown or the lookup fails. Failures are logged, not returned.
pub async fn resolve_product<L: ProductLookup>(lookup: &L, barcode: &str) -> ProductInfo {
    match lookup.lookup(barcode).await {
        Ok(Some(info)) => info,
        Ok(None) => {
            debug!("Barcode {} not found, using placeholder", barcode);
            ProductInfo::placeholder(barcode)
        }
        Err(e) => {
            warn!("Product lookup for {} failed: {}", barcode, e);
            ProductInfo::placeholder(barcode)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    struct FixedLookup(Option<ProductInfo>);

    impl ProductLookup for FixedLookup {
        async fn lookup(&self, _barcode: &str) -> Result<Option<ProductInfo>> {
            Ok(self.0.clone())
        }
    }

    struct FailingLookup;

    impl ProductLookup for FailingLookup {
        async fn lookup(&self, _barcode: &str) -> Result<Option<ProductInfo>> {
            Err(Error::Lookup {
                message: "connection refused".to_string(),
            })
        }
    }

    #[test]
    fn test_parse_found_product() {
        let body = r#"{"status":1,"product":{"product_name":"Nutella","brands":"Ferrero"}}"#;
        let info = parse_product_response("3017620422003", body).unwrap();
        assert_eq!(
            info,
            Some(ProductInfo {
                name: "Nutella".to_string(),
                brand: "Ferrero".to_string()
            })
        );
    }

    #[test]
    fn test_parse_found_product_with_blank_fields() {
        let body = r#"{"status":1,"product":{"product_name":"  ","brands":null}}"#;
        let info = parse_product_response("12345678", body).unwrap().unwrap();
        assert_eq!(info, ProductInfo::placeholder("12345678"));
    }

    #[test]
    fn test_parse_not_found() {
        let body = r#"{"status":0,"status_verbose":"product not found"}"#;
        assert_eq!(parse_product_response("12345678", body).unwrap(), None);
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(matches!(
            parse_product_response("12345678", "<html>"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode(" 3017620422003 ").unwrap(), "3017620422003");
        assert!(validate_barcode("12345678").is_ok());
        assert!(validate_barcode("1234567").is_err());
        assert!(validate_barcode("123456789012345").is_err());
        assert!(validate_barcode("30176204220a3").is_err());
    }

    #[test]
    fn test_product_url() {
        let lookup =
            OpenFoodFactsLookup::new("https://example.org/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            lookup.product_url("12345678"),
            "https://example.org/api/v0/product/12345678.json"
        );
    }

    #[tokio::test]
    async fn test_resolve_product_uses_lookup_result() {
        let found = ProductInfo {
            name: "Oat Milk".to_string(),
            brand: "Oatly".to_string(),
        };
        let info = resolve_product(&FixedLookup(Some(found.clone())), "12345678").await;
        assert_eq!(info, found);
    }

    #[tokio::test]
    async fn test_resolve_product_falls_back_on_not_found_and_error() {
        let info = resolve_product(&FixedLookup(None), "12345678").await;
        assert_eq!(info.name, "Product 12345678");
        assert_eq!(info.brand, "Unknown Brand");

        let info = resolve_product(&FailingLookup, "87654321").await;
        assert_eq!(info, ProductInfo::placeholder("87654321"));
    }
}
