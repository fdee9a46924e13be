// src/router.rs
use crate::db::{analytics, businesses, rooms};
use crate::domain::analytics::NewAnalyticsEvent;
use crate::domain::listing::{ListingKind, NewBusiness, NewRoom};
use crate::errors::ServerError;
use crate::ranking::order_listings;
use crate::responses::{json_created, json_response, ResultResp};
use crate::state::AppState;
use astra::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;

/// Largest request body accepted, in bytes.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(&serde_json::json!({ "status": "ok" })),

        ("GET", "/api/listings") => {
            let tenant = required(&params, "tenant")?;
            let kind = params
                .get("kind")
                .filter(|k| !k.is_empty())
                .map(|k| k.parse::<ListingKind>())
                .transpose()?;

            let rows = businesses::list_businesses(&state.db, tenant, kind)?;
            let ordered = order_listings(rows, &mut state.rng());
            json_response(&ordered)
        }

        ("GET", "/api/rooms") => {
            let tenant = required(&params, "tenant")?;
            let rows = rooms::list_rooms(&state.db, tenant)?;
            let ordered = order_listings(rows, &mut state.rng());
            json_response(&ordered)
        }

        // Orders listings fetched elsewhere; accepts flat and joined rows alike.
        ("POST", "/api/rank") => {
            let body: Value = read_json(&mut req)?;
            let Value::Array(items) = body else {
                return Err(ServerError::BadRequest("expected a JSON array".into()));
            };
            let ordered = order_listings(items, &mut state.rng());
            json_response(&ordered)
        }

        ("POST", "/api/businesses") => {
            let new = read_json::<NewBusiness>(&mut req)?.normalize()?;
            let id = businesses::insert_business(&state.db, &new)?;
            tracing::info!(id, tenant = %new.tenant, kind = %new.kind, "business created");
            json_created(id)
        }

        ("POST", "/api/rooms") => {
            let new: NewRoom = read_json(&mut req)?;
            new.validate()?;
            let id = rooms::insert_room(&state.db, &new)?;
            tracing::info!(id, business_id = new.business_id, "room created");
            json_created(id)
        }

        ("POST", "/api/analytics") => {
            let ev: NewAnalyticsEvent = read_json(&mut req)?;
            ev.validate()?;
            let id = analytics::insert_event(&state.db, &ev)?;
            json_created(id)
        }

        ("GET", "/api/analytics/summary") => {
            let tenant = required(&params, "tenant")?;
            let counts = analytics::count_by_type(&state.db, tenant)?;
            json_response(&counts)
        }

        _ => Err(ServerError::NotFound),
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing query parameter: {key}")))
}

fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }

    serde_json::from_slice(&buf).map_err(|e| ServerError::BadRequest(format!("invalid JSON: {e}")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri().query().map(parse_query_str).unwrap_or_default()
}

fn parse_query_str(q: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(q.as_bytes())
        .into_owned()
        .collect()
}
