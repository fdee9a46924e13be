// src/domain/analytics.rs
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    ListingView,
    ListingClick,
    BookingRequest,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "page_view",
            EventType::ListingView => "listing_view",
            EventType::ListingClick => "listing_click",
            EventType::BookingRequest => "booking_request",
        }
    }

    /// Listing events must say which business they are about.
    pub fn needs_business(&self) -> bool {
        !matches!(self, EventType::PageView)
    }
}

impl FromStr for EventType {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_view" => Ok(EventType::PageView),
            "listing_view" => Ok(EventType::ListingView),
            "listing_click" => Ok(EventType::ListingClick),
            "booking_request" => Ok(EventType::BookingRequest),
            other => Err(ServerError::DbError(format!("unknown event type in store: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnalyticsEvent {
    pub tenant: String,
    pub event_type: EventType,
    pub business_id: Option<i64>,
    pub path: Option<String>,
}

impl NewAnalyticsEvent {
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.tenant.trim().is_empty() {
            return Err(ServerError::BadRequest("tenant is required".into()));
        }
        if self.event_type.needs_business() && self.business_id.is_none() {
            return Err(ServerError::BadRequest(format!(
                "{} requires business_id",
                self.event_type.as_str()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    pub event_type: EventType,
    pub count: i64,
}
