use anyhow::Context as _;
use chrono::NaiveDateTime;
use serde::Deserialize as _;
use serde_json::Value;

use crate::global::Global;

pub mod types;

use types::{CatalogElement, KeyImage, Offer, OfferGroup, PromotionsResponse};

pub const BASE_GAME: &str = "BASE_GAME";
pub const PRODUCT_PAGE: &str = "https://store.epicgames.com/p";
pub const FALLBACK_LINK: &str = "https://store.epicgames.com/free-games";
pub const UNKNOWN_END_DATE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";

/// A base game currently offered at zero price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeGameOffer {
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: String,
    pub end_date: String,
}

/// Structural problems in an element that already passed the filters.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("offer group of {0:?} has no promotionalOffers list")]
    MissingOfferList(String),
    #[error("offer of {0:?} has no discountSetting")]
    MissingDiscountSetting(String),
    #[error("offer of {0:?} has no discountPercentage")]
    MissingDiscountPercentage(String),
}

/// Fetches the promotions catalog and returns the free base games in catalog order.
///
/// Never fails: any network, payload or shape error is logged and yields an
/// empty list.
#[tracing::instrument(name = "epic", skip_all)]
pub async fn fetch_free_base_games(global: &Global) -> Vec<FreeGameOffer> {
    match scrape(global).await {
        Ok(games) => {
            tracing::info!(count = games.len(), "scraped free games from epic");
            games
        }
        Err(e) => {
            tracing::error!("failed to fetch epic promotions: {:#}", e);
            Vec::new()
        }
    }
}

async fn scrape(global: &Global) -> anyhow::Result<Vec<FreeGameOffer>> {
    let resp = global
        .http_client
        .get(&global.config.epic_promotions_url)
        .send()
        .await
        .context("promotions request")?
        .error_for_status()
        .context("promotions status")?
        .json::<PromotionsResponse>()
        .await
        .context("promotions payload")?;

    let games = collect_free_base_games(&resp.data.catalog.search_store.elements)?;

    Ok(games)
}

/// Runs the filter pass over the catalog elements.
///
/// Filters short-circuit in order: promotions present, current offers present,
/// base game (or untagged), then a zero-discount offer. An element is only
/// decoded once it has promotions; one that still fails to decode is skipped.
pub fn collect_free_base_games(elements: &[Value]) -> Result<Vec<FreeGameOffer>, CatalogError> {
    let mut free_games = Vec::new();

    for raw in elements {
        if raw.get("promotions").map_or(true, Value::is_null) {
            continue;
        }

        let element = match CatalogElement::deserialize(raw) {
            Ok(element) => element,
            Err(e) => {
                tracing::warn!(title = ?raw.get("title"), error = %e, "skipping malformed catalog element");
                continue;
            }
        };

        let Some(promotions) = &element.promotions else {
            continue;
        };

        let Some(groups) = promotions
            .promotional_offers
            .as_deref()
            .filter(|groups| !groups.is_empty())
        else {
            continue;
        };

        if !is_base_game(&element) {
            tracing::debug!(title = ?element.title, offer_type = ?element.offer_type, "skipping add-on");
            continue;
        }

        let Some(offer) = first_free_offer(&element, groups)? else {
            continue;
        };

        free_games.push(FreeGameOffer {
            title: element.title.clone().unwrap_or_default(),
            description: element
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            link: product_link(&element),
            image: select_image(element.key_images.as_deref().unwrap_or_default()),
            end_date: format_end_date(offer.end_date.as_deref()),
        });
    }

    Ok(free_games)
}

// Untagged entries are kept, upstream does not tag every base game.
fn is_base_game(element: &CatalogElement) -> bool {
    match element.offer_type.as_deref() {
        None | Some("") => true,
        Some(kind) => kind == BASE_GAME,
    }
}

/// First offer with a zero discount percentage, scanning groups in order.
/// A `null` percentage is simply not free; a missing one is malformed.
fn first_free_offer<'a>(
    element: &CatalogElement,
    groups: &'a [OfferGroup],
) -> Result<Option<&'a Offer>, CatalogError> {
    let title = || element.title.clone().unwrap_or_default();

    for group in groups {
        let offers = group
            .promotional_offers
            .as_ref()
            .ok_or_else(|| CatalogError::MissingOfferList(title()))?;

        for offer in offers {
            let percentage = offer
                .discount_setting
                .as_ref()
                .ok_or_else(|| CatalogError::MissingDiscountSetting(title()))?
                .discount_percentage
                .ok_or_else(|| CatalogError::MissingDiscountPercentage(title()))?;

            if percentage == Some(0.0) {
                return Ok(Some(offer));
            }
        }
    }

    Ok(None)
}

/// Renders `2025-12-14T16:00:00.000Z` as `2025-12-14 16:00 (UTC)`.
///
/// Anything after the first `.` is dropped before parsing. Unparseable input is
/// returned as-is.
pub fn format_end_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return UNKNOWN_END_DATE.to_string();
    };

    let stripped = raw.split('.').next().unwrap_or(raw);

    match NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => format!("{} (UTC)", dt.format("%Y-%m-%d %H:%M")),
        Err(_) => raw.to_string(),
    }
}

pub fn product_link(element: &CatalogElement) -> String {
    let slug = element
        .product_slug
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| element.url_slug.as_deref().filter(|s| !s.is_empty()));

    match slug {
        Some(slug) => format!("{PRODUCT_PAGE}/{slug}"),
        None => FALLBACK_LINK.to_string(),
    }
}

/// A thumbnail wins outright. Without one, the last wide offer image is used.
pub fn select_image(images: &[KeyImage]) -> String {
    let mut image = "";

    for img in images {
        match img.kind.as_deref() {
            Some("Thumbnail") => {
                image = img.url.as_deref().unwrap_or_default();
                break;
            }
            Some("OfferImageWide") => image = img.url.as_deref().unwrap_or_default(),
            _ => {}
        }
    }

    image.to_string()
}
