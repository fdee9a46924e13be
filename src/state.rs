// src/state.rs
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::OrderingConfig;
use crate::db::Database;

/// Everything a request handler needs. Cloned into each server worker.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub ordering: OrderingConfig,
}

impl AppState {
    pub fn new(db: Database, ordering: OrderingConfig) -> Self {
        Self { db, ordering }
    }

    /// Random source for one request's listing order.
    pub fn rng(&self) -> StdRng {
        match self.ordering.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
