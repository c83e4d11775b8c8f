use coachflow::session::{
    ActiveSessionIndex, InMemorySessionStore, SessionStore, ACTIVE_POINTER_NAMESPACE,
    SESSION_NAMESPACE,
};
use coachflow::shared::{FlowId, SessionId, UserId};
use serde_json::json;
use std::sync::Arc;

#[test]
fn store_is_usable_as_a_trait_object() {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    store
        .set(SESSION_NAMESPACE, "sess-1", json!({"stepId": "area"}), 60)
        .expect("set");
    assert!(store
        .get(SESSION_NAMESPACE, "sess-1")
        .expect("get")
        .is_some());
    store.delete(SESSION_NAMESPACE, "sess-1").expect("delete");
    assert!(store
        .get(SESSION_NAMESPACE, "sess-1")
        .expect("get")
        .is_none());
}

#[test]
fn writes_reset_the_ttl_per_key() {
    let store = InMemorySessionStore::new();
    // First write already expired, second write with a live TTL wins.
    store
        .set(SESSION_NAMESPACE, "sess-1", json!("old"), 0)
        .expect("set");
    store
        .set(SESSION_NAMESPACE, "sess-1", json!("new"), 60)
        .expect("set");
    assert_eq!(
        store.get(SESSION_NAMESPACE, "sess-1").expect("get"),
        Some(json!("new"))
    );
}

#[test]
fn active_index_treats_malformed_pointers_as_absent() {
    let store = Arc::new(InMemorySessionStore::new());
    let index = ActiveSessionIndex::new(store.clone());
    let flow = FlowId::parse("hydration_check").expect("flow id");
    let user = UserId::parse("u1").expect("user id");

    store
        .set(
            ACTIVE_POINTER_NAMESPACE,
            "hydration_check:u1",
            json!({"not": "a session id"}),
            60,
        )
        .expect("seed");
    assert_eq!(index.lookup(&flow, &user).expect("lookup"), None);
}

#[test]
fn pointer_ttl_matches_the_value_passed_on_write() {
    let store = Arc::new(InMemorySessionStore::new());
    let index = ActiveSessionIndex::new(store.clone());
    let flow = FlowId::parse("hydration_check").expect("flow id");
    let user = UserId::parse("u1").expect("user id");
    let session = SessionId::parse("sess-1-0000").expect("session id");

    index.point(&flow, &user, &session, 0).expect("point");
    assert_eq!(index.lookup(&flow, &user).expect("lookup"), None);

    index.point(&flow, &user, &session, 60).expect("point");
    assert_eq!(index.lookup(&flow, &user).expect("lookup"), Some(session));
}
