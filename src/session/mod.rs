pub mod active_index;
pub mod store;

pub use active_index::ActiveSessionIndex;
pub use store::{
    InMemorySessionStore, SessionStore, StoreError, ACTIVE_POINTER_NAMESPACE, SESSION_NAMESPACE,
};

use crate::shared::{FlowId, SessionId, StepId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SESSION_SUFFIX_SPACE: u32 = 36 * 36 * 36 * 36;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub session_id: SessionId,
    pub flow_id: FlowId,
    pub user_id: UserId,
    pub step_id: StepId,
    #[serde(default)]
    pub collected: BTreeMap<String, String>,
    pub started_at: i64,
    pub updated_at: i64,
}

impl FlowState {
    pub fn new(
        session_id: SessionId,
        flow_id: FlowId,
        user_id: UserId,
        step_id: StepId,
        now: i64,
    ) -> Self {
        Self {
            session_id,
            flow_id,
            user_id,
            step_id,
            collected: BTreeMap::new(),
            started_at: now,
            updated_at: now,
        }
    }
}

fn base36(mut value: u64, min_width: usize) -> String {
    let mut chars = Vec::new();
    loop {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
        if value == 0 {
            break;
        }
    }
    while chars.len() < min_width {
        chars.push('0');
    }
    chars.iter().rev().collect()
}

/// Compact opaque session token: `sess-{timestamp36}-{random4}`.
pub fn generate_session_id(now: i64) -> Result<SessionId, String> {
    let timestamp = u64::try_from(now)
        .map_err(|_| "session id generation requires a non-negative timestamp".to_string())?;
    let mut bytes = [0_u8; 4];
    getrandom::getrandom(&mut bytes)
        .map_err(|err| format!("failed to generate session id randomness: {err}"))?;
    let sample = u32::from_le_bytes(bytes) % SESSION_SUFFIX_SPACE;
    let ts = base36(timestamp, 1);
    let suffix = base36(u64::from(sample), 4);
    SessionId::parse(&format!("sess-{ts}-{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encoding_is_stable() {
        assert_eq!(base36(0, 1), "0");
        assert_eq!(base36(35, 1), "z");
        assert_eq!(base36(36, 1), "10");
        assert_eq!(base36(0, 4), "0000");
        assert_eq!(base36(35, 4), "000z");
    }

    #[test]
    fn session_ids_carry_prefix_and_validate() {
        let id = generate_session_id(1_700_000_000).expect("session id");
        assert!(id.as_str().starts_with("sess-"));
        assert!(SessionId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn session_id_rejects_negative_timestamp() {
        assert!(generate_session_id(-1).is_err());
    }

    #[test]
    fn flow_state_roundtrips_through_json() {
        let state = FlowState::new(
            SessionId::parse("sess-1-0000").expect("session id"),
            FlowId::parse("injury_triage").expect("flow id"),
            UserId::parse("u1").expect("user id"),
            StepId::parse("area").expect("step id"),
            7,
        );
        let raw = serde_json::to_value(&state).expect("encode");
        let back: FlowState = serde_json::from_value(raw).expect("decode");
        assert_eq!(back, state);
    }
}
