pub mod player;

use garde::Validate;
use roster_dal::{
    filter::PlayerFilter,
    player::{PlayerOrder, Profession, Race},
    ListingParams, MAX_LIMIT,
};

use crate::error::{ApiError, ApiResult};

/// Filter part of the query string, shared by listing and counting.
#[derive(Debug, Clone, Default, Validate, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
#[garde(allow_unvalidated)]
pub struct PlayerFilterQuery {
    #[garde(length(max = 255))]
    pub name: Option<String>,
    #[garde(length(max = 255))]
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    /// Earliest birthday, epoch millis
    pub after: Option<i64>,
    /// Latest birthday, epoch millis
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
}

impl PlayerFilterQuery {
    pub fn filter(&self) -> PlayerFilter {
        PlayerFilter {
            name: self.name.clone(),
            title: self.title.clone(),
            race: self.race,
            profession: self.profession,
            after: self.after,
            before: self.before,
            banned: self.banned,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

/// Paging and order part of the query string, used by listing only.
#[derive(Debug, Clone, Default, Validate, serde::Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
#[garde(allow_unvalidated)]
pub struct PagingQuery {
    pub order: Option<PlayerOrder>,
    /// Zero based
    pub page_number: Option<u32>,
    /// Sizes above the listing limit are clamped to it
    #[garde(range(min = 1))]
    pub page_size: Option<u32>,
}

impl PagingQuery {
    pub fn listing_params(&self, default_page_size: u32) -> ListingParams {
        let page_size = self
            .page_size
            .unwrap_or(default_page_size)
            .min(MAX_LIMIT as u32);
        ListingParams::page(self.page_number.unwrap_or(0), page_size)
            .with_order(self.order.unwrap_or_default())
    }
}

/// Player id from path, must be a plain positive decimal number
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    let invalid = || ApiError::InvalidPath(format!("Invalid player id {raw}"));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}
