// src/domain/listing.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ServerError;
use crate::ranking::{Ranked, RankingRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Hotel,
    Restaurant,
    Experience,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Hotel => "hotel",
            ListingKind::Restaurant => "restaurant",
            ListingKind::Experience => "experience",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" | "hotels" => Ok(ListingKind::Hotel),
            "restaurant" | "restaurants" => Ok(ListingKind::Restaurant),
            "experience" | "experiences" => Ok(ListingKind::Experience),
            other => Err(ServerError::BadRequest(format!(
                "unknown listing kind: {other}"
            ))),
        }
    }
}

/// A business as shown on the destination's listing pages.
/// Carries its own ranking attributes.
#[derive(Debug, Clone, Serialize)]
pub struct Business {
    pub id: i64,
    pub tenant: String,
    pub kind: ListingKind,
    pub name: String,
    pub slug: String,
    pub area: Option<String>,
    pub description: Option<String>,
    pub featured_order: Option<i64>,
    pub is_omd_member: Option<bool>,
    pub created_at: NaiveDateTime,
}

impl Ranked for Business {
    fn ranking(&self) -> RankingRecord {
        RankingRecord {
            featured_order: self.featured_order,
            is_omd_member: self.is_omd_member,
        }
    }
}

/// Payload for creating a business.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBusiness {
    pub tenant: String,
    pub kind: ListingKind,
    pub name: String,
    pub slug: Option<String>,
    pub area: Option<String>,
    pub description: Option<String>,
    pub featured_order: Option<i64>,
    pub is_omd_member: Option<bool>,
}

impl NewBusiness {
    /// Trims text fields, derives a slug from the name when none is given.
    pub fn normalize(mut self) -> Result<Self, ServerError> {
        self.tenant = self.tenant.trim().to_string();
        self.name = self.name.trim().to_string();
        if self.tenant.is_empty() {
            return Err(ServerError::BadRequest("tenant is required".into()));
        }
        if self.name.is_empty() {
            return Err(ServerError::BadRequest("name is required".into()));
        }

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => slugify(s),
            _ => slugify(&self.name),
        };
        if slug.is_empty() {
            return Err(ServerError::BadRequest("name has no usable characters".into()));
        }
        self.slug = Some(slug);
        Ok(self)
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    out
}

/// The owning business as embedded in a joined row.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub featured_order: Option<i64>,
    pub is_omd_member: Option<bool>,
}

/// A bookable room joined to its hotel. Ranked by the hotel, not the room.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub price_per_night: Option<i64>,
    pub created_at: NaiveDateTime,
    pub businesses: BusinessSummary,
}

impl Ranked for Room {
    fn ranking(&self) -> RankingRecord {
        RankingRecord {
            featured_order: self.businesses.featured_order,
            is_omd_member: self.businesses.is_omd_member,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    pub business_id: i64,
    pub name: String,
    #[serde(default = "default_capacity")]
    pub capacity: i64,
    pub price_per_night: Option<i64>,
}

fn default_capacity() -> i64 {
    1
}

impl NewRoom {
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.name.trim().is_empty() {
            return Err(ServerError::BadRequest("name is required".into()));
        }
        if self.capacity < 1 {
            return Err(ServerError::BadRequest("capacity must be at least 1".into()));
        }
        if matches!(self.price_per_night, Some(p) if p < 0) {
            return Err(ServerError::BadRequest("price_per_night cannot be negative".into()));
        }
        Ok(())
    }
}
