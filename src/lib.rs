//! Listing order and thin JSON API for a destination-management portal.
//!
//! Marketing pages show businesses in three tiers: up to three pinned
//! slots, then member businesses, then everyone else. The two lower tiers
//! are reshuffled on every request. See [`ranking::order_listings`].

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod ranking;
pub mod responses;
pub mod router;
pub mod state;
