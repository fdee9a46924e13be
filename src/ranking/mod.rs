// src/ranking/mod.rs
//
// Listing order used by every marketing page: pinned slots first, then
// member businesses in rotation, then everyone else in rotation.

pub mod featured;
pub mod shuffle;

pub use featured::order_listings;

use serde_json::Value;

/// Lowest and highest editorially pinned slot.
pub const FIRST_FEATURED_SLOT: i64 = 1;
pub const LAST_FEATURED_SLOT: i64 = 3;

/// The two attributes ordering depends on, after resolving whichever
/// record (the item itself or its owning business) carries them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingRecord {
    pub featured_order: Option<i64>,
    pub is_omd_member: Option<bool>,
}

/// Anything that can be placed on a listings page.
///
/// Implementors decide where the ranking attributes live. Callers never
/// inspect the shape themselves.
pub trait Ranked {
    fn ranking(&self) -> RankingRecord;
}

impl<T: Ranked + ?Sized> Ranked for &T {
    fn ranking(&self) -> RankingRecord {
        (**self).ranking()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Featured,
    Member,
    NonMember,
}

/// First match wins: a pinned slot beats membership.
pub fn classify(record: &RankingRecord) -> Tier {
    match record.featured_order {
        Some(slot) if (FIRST_FEATURED_SLOT..=LAST_FEATURED_SLOT).contains(&slot) => Tier::Featured,
        _ if record.is_omd_member == Some(true) => Tier::Member,
        _ => Tier::NonMember,
    }
}

impl RankingRecord {
    /// Reads the attributes off a single JSON object. Anything that is not
    /// an integer (or a boolean, for membership) counts as absent.
    pub fn from_json(source: &Value) -> Self {
        let featured_order = source.get("featured_order").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        });

        Self {
            featured_order,
            is_omd_member: source.get("is_omd_member").and_then(Value::as_bool),
        }
    }
}

/// The owning business embedded in a join row, if the row carries one.
///
/// Joined rows name the relation `businesses`; some older payloads use
/// `business`. A to-many join arrives as an array and its first row wins.
pub fn nested_business(item: &Value) -> Option<&Value> {
    let relation = item.get("businesses").or_else(|| item.get("business"))?;
    match relation {
        Value::Object(_) => Some(relation),
        Value::Array(rows) => rows.first().filter(|row| row.is_object()),
        _ => None,
    }
}

impl Ranked for Value {
    fn ranking(&self) -> RankingRecord {
        RankingRecord::from_json(nested_business(self).unwrap_or(self))
    }
}
