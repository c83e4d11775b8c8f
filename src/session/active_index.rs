use super::store::{SessionStore, StoreError, ACTIVE_POINTER_NAMESPACE};
use crate::shared::{FlowId, SessionId, UserId};
use serde_json::Value;
use std::sync::Arc;

/// Maps `(flow_id, user_id)` to the open session id, sharing the session TTL.
#[derive(Clone)]
pub struct ActiveSessionIndex {
    store: Arc<dyn SessionStore>,
}

impl ActiveSessionIndex {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    // Ids cannot contain `:`, so this key never collides across users or
    // flows.
    fn pointer_key(flow_id: &FlowId, user_id: &UserId) -> String {
        format!("{flow_id}:{user_id}")
    }

    pub fn lookup(
        &self,
        flow_id: &FlowId,
        user_id: &UserId,
    ) -> Result<Option<SessionId>, StoreError> {
        let key = Self::pointer_key(flow_id, user_id);
        let Some(value) = self.store.get(ACTIVE_POINTER_NAMESPACE, &key)? else {
            return Ok(None);
        };
        // A malformed pointer is treated as absent.
        let raw = value.as_str().unwrap_or_default();
        Ok(SessionId::parse(raw).ok())
    }

    pub fn point(
        &self,
        flow_id: &FlowId,
        user_id: &UserId,
        session_id: &SessionId,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let key = Self::pointer_key(flow_id, user_id);
        self.store.set(
            ACTIVE_POINTER_NAMESPACE,
            &key,
            Value::String(session_id.to_string()),
            ttl_seconds,
        )
    }

    pub fn clear(&self, flow_id: &FlowId, user_id: &UserId) -> Result<(), StoreError> {
        let key = Self::pointer_key(flow_id, user_id);
        self.store.delete(ACTIVE_POINTER_NAMESPACE, &key)
    }
}
