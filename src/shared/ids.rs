use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

macro_rules! define_id_type {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, String> {
                validate_identifier_value($kind, raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(|err| {
                    D::Error::custom(format!("invalid {} `{}`: {}", $kind, raw, err))
                })
            }
        }
    };
}

define_id_type!(FlowId, "flow id");
define_id_type!(StepId, "step id");
define_id_type!(UserId, "user id");
define_id_type!(SessionId, "session id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ascii_identifiers() {
        assert!(FlowId::parse("injury_triage").is_ok());
        assert!(UserId::parse("user-42").is_ok());
        assert!(SessionId::parse("sess-abc123-0x9z").is_ok());
    }

    #[test]
    fn rejects_empty_and_non_ascii_identifiers() {
        assert!(FlowId::parse("").is_err());
        assert!(StepId::parse("pain level").is_err());
        assert!(UserId::parse("u:1").is_err());
    }

    #[test]
    fn deserialize_validates_identifier() {
        let ok: Result<FlowId, _> = serde_json::from_str("\"hydration_check\"");
        assert_eq!(ok.expect("flow id").as_str(), "hydration_check");
        let bad: Result<FlowId, _> = serde_json::from_str("\"bad flow\"");
        assert!(bad.is_err());
    }
}
