// src/ranking/featured.rs
use rand::Rng;
use tracing::debug;

use super::shuffle::shuffle_in_place;
use super::{classify, Ranked, Tier};

/// Orders listings for display.
///
/// Items pinned to slots 1..=3 come first in slot order. Items sharing a
/// slot keep their input order. Members follow in a fresh random order,
/// then non-members in a fresh random order. The output always holds
/// exactly the input items.
pub fn order_listings<T, I, R>(items: I, rng: &mut R) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Ranked,
    R: Rng + ?Sized,
{
    let mut featured: Vec<(i64, T)> = Vec::new();
    let mut members: Vec<T> = Vec::new();
    let mut non_members: Vec<T> = Vec::new();

    for item in items {
        let record = item.ranking();
        match classify(&record) {
            Tier::Featured => featured.push((record.featured_order.unwrap_or(0), item)),
            Tier::Member => members.push(item),
            Tier::NonMember => non_members.push(item),
        }
    }

    // sort_by_key is stable: ties keep input order.
    featured.sort_by_key(|(slot, _)| *slot);
    shuffle_in_place(&mut members, rng);
    shuffle_in_place(&mut non_members, rng);

    debug!(
        featured = featured.len(),
        members = members.len(),
        non_members = non_members.len(),
        "ordered listings"
    );

    let mut out = Vec::with_capacity(featured.len() + members.len() + non_members.len());
    out.extend(featured.into_iter().map(|(_, item)| item));
    out.extend(members);
    out.extend(non_members);
    out
}
