// src/tests/router_tests/listings_tests.rs

use crate::tests::utils::{body_json, create, get, post_json, send, strings_at, test_state};
use crate::state::AppState;
use serde_json::{json, Value};
use std::collections::HashSet;

fn business(state: &AppState, kind: &str, name: &str, featured_order: Value, member: Value) -> i64 {
    create(
        state,
        "/api/businesses",
        json!({
            "tenant": "brasov",
            "kind": kind,
            "name": name,
            "featured_order": featured_order,
            "is_omd_member": member,
        }),
    )
}

fn seed_brasov(state: &AppState) {
    business(state, "hotel", "Aro Palace", json!(2), json!(null));
    business(state, "hotel", "Kronwell", json!(1), json!(true));
    business(state, "hotel", "Ambient", json!(3), json!(false));
    business(state, "hotel", "Casa Wagner", json!(null), json!(true));
    business(state, "hotel", "Bella Muzica", json!(null), json!(true));
    business(state, "hotel", "Pensiunea Ela", json!(null), json!(false));
    business(state, "hotel", "Hostel Mara", json!(null), json!(null));
    business(state, "hotel", "Drakula Inn", json!(5), json!(null));
    business(state, "restaurant", "Sergiana", json!(1), json!(true));
}

fn set(items: &[String]) -> HashSet<&str> {
    items.iter().map(String::as_str).collect()
}

#[test]
fn health_reports_ok() {
    let state = test_state(None);
    let resp = send(&state, get("/health"));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!({"status": "ok"}));
}

#[test]
fn hotels_come_back_in_tier_order() {
    let state = test_state(None);
    seed_brasov(&state);

    for _ in 0..10 {
        let resp = send(&state, get("/api/listings?tenant=brasov&kind=hotel"));
        assert_eq!(resp.status(), 200);
        let slugs = strings_at(&body_json(resp), "slug");

        assert_eq!(slugs.len(), 8);
        assert_eq!(slugs[..3], ["kronwell", "aro-palace", "ambient"]);
        assert_eq!(set(&slugs[3..5]), HashSet::from(["casa-wagner", "bella-muzica"]));
        assert_eq!(
            set(&slugs[5..]),
            HashSet::from(["pensiunea-ela", "hostel-mara", "drakula-inn"])
        );
    }
}

#[test]
fn shared_slot_across_kinds_keeps_name_order() {
    let state = test_state(Some(3));
    seed_brasov(&state);

    let slugs = strings_at(&body_json(send(&state, get("/api/listings?tenant=brasov"))), "slug");
    assert_eq!(slugs.len(), 9);
    assert_eq!(slugs[..4], ["kronwell", "sergiana", "aro-palace", "ambient"]);
}

#[test]
fn seeded_ordering_is_reproducible() {
    let state = test_state(Some(7));
    seed_brasov(&state);

    let first = body_json(send(&state, get("/api/listings?tenant=brasov&kind=hotels")));
    let second = body_json(send(&state, get("/api/listings?tenant=brasov&kind=hotels")));
    assert_eq!(strings_at(&first, "slug"), strings_at(&second, "slug"));
}

#[test]
fn other_tenants_are_not_listed() {
    let state = test_state(None);
    seed_brasov(&state);

    let resp = send(&state, get("/api/listings?tenant=sibiu"));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!([]));
}

#[test]
fn missing_tenant_is_bad_request() {
    let state = test_state(None);
    let resp = send(&state, get("/api/listings?kind=hotel"));
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["error"].as_str().unwrap().contains("tenant"));
}

#[test]
fn unknown_kind_is_bad_request() {
    let state = test_state(None);
    let resp = send(&state, get("/api/listings?tenant=brasov&kind=spa"));
    assert_eq!(resp.status(), 400);
}

#[test]
fn duplicate_business_slug_is_bad_request() {
    let state = test_state(None);
    business(&state, "hotel", "Aro Palace", json!(null), json!(null));

    let resp = send(
        &state,
        post_json(
            "/api/businesses",
            &json!({"tenant": "brasov", "kind": "hotel", "name": "Aro  Palace"}),
        ),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_route_is_not_found() {
    let state = test_state(None);
    let resp = send(&state, get("/api/nothing-here"));
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({"error": "Not Found"}));
}
