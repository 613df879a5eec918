//! Wire shapes of the storefront `freeGamesPromotions` payload.
//!
//! The outer path down to `elements` is required; a payload without it is
//! rejected as a whole. Elements stay raw until the filter pass reaches them,
//! so an odd field on an entry that gets skipped cannot sink the run.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct PromotionsResponse {
    pub data: CatalogData,
}

#[derive(Debug, Deserialize)]
pub struct CatalogData {
    #[serde(rename = "Catalog")]
    pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub search_store: SearchStore,
}

#[derive(Debug, Deserialize)]
pub struct SearchStore {
    pub elements: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogElement {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub offer_type: Option<String>,
    #[serde(default)]
    pub product_slug: Option<String>,
    #[serde(default)]
    pub url_slug: Option<String>,
    #[serde(default)]
    pub key_images: Option<Vec<KeyImage>>,
    #[serde(default)]
    pub promotions: Option<Promotions>,
}

#[derive(Debug, Deserialize)]
pub struct KeyImage {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotions {
    #[serde(default)]
    pub promotional_offers: Option<Vec<OfferGroup>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroup {
    #[serde(default)]
    pub promotional_offers: Option<Vec<Offer>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub discount_setting: Option<DiscountSetting>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSetting {
    /// `None` when the key is absent, `Some(None)` when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub discount_percentage: Option<Option<f64>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
