//! Subdomain record model shared by the resolve pipeline, storage and export.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Resolution state of a record.
///
/// Persisted and serialized as NULL (unresolved), 1 (success) or 0 (failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    /// Not resolved yet
    #[default]
    Unresolved,
    /// Resolved with at least one address
    Success,
    /// Answered without a usable address
    Failure,
}

impl ResolveState {
    /// Stored flag: `None`, `Some(1)` or `Some(0)`.
    pub fn as_flag(self) -> Option<u8> {
        match self {
            ResolveState::Unresolved => None,
            ResolveState::Success => Some(1),
            ResolveState::Failure => Some(0),
        }
    }

    /// Any non-zero flag counts as success.
    pub fn from_flag(flag: Option<i64>) -> Self {
        match flag {
            None => ResolveState::Unresolved,
            Some(0) => ResolveState::Failure,
            Some(_) => ResolveState::Success,
        }
    }
}

mod resolve_flag {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ResolveState;

    pub fn serialize<S: Serializer>(state: &ResolveState, s: S) -> Result<S::Ok, S::Error> {
        state.as_flag().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ResolveState, D::Error> {
        Option::<i64>::deserialize(d).map(ResolveState::from_flag)
    }
}

/// Upstream collectors write `null` for fields they have not filled in yet.
mod nullable_string {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Option::<String>::deserialize(d).map(Option::unwrap_or_default)
    }
}

/// `alive` is stored as a 0/1 flag; JSON input may carry either that or a bool.
mod alive_flag {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(alive: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
        alive.map(u8::from).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        Ok(Option::<Flag>::deserialize(d)?.map(|flag| match flag {
            Flag::Bool(b) => b,
            Flag::Int(n) => n != 0,
        }))
    }
}

/// Classification reason stored alongside a resolved (or failed) record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Reason {
    /// Resolved to at least one A record
    #[serde(rename = "OK")]
    #[strum(serialize = "OK")]
    Ok,
    /// NOERROR without an answer section
    NoAnswer,
    /// Answers present but none of type A
    NoARecord,
}

/// One collected subdomain and its resolution data.
///
/// `ip`, `cname` and `ttl` are comma-joined lists that stay positionally aligned
/// whenever `resolve` is [`ResolveState::Success`]. Collection metadata (`url`,
/// `port`, `level`, `module`, `source`) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Fully qualified subdomain, the resolution key
    pub subdomain: String,
    /// URL the collector built for it
    #[serde(default)]
    pub url: Option<String>,
    /// Port of `url`
    #[serde(default)]
    pub port: Option<u16>,
    /// Label depth below the target domain
    #[serde(default)]
    pub level: Option<u32>,
    /// Comma-joined IPv4 addresses; empty until resolved
    #[serde(default, deserialize_with = "nullable_string::deserialize")]
    pub ip: String,
    /// Comma-joined owner names of the addresses
    #[serde(default, deserialize_with = "nullable_string::deserialize")]
    pub cname: String,
    /// Comma-joined TTLs of the addresses
    #[serde(default, deserialize_with = "nullable_string::deserialize")]
    pub ttl: String,
    /// Resolution state (NULL/1/0 flag on the wire)
    #[serde(default, with = "resolve_flag")]
    pub resolve: ResolveState,
    /// Why the record ended up in its state
    #[serde(default)]
    pub reason: Option<Reason>,
    /// Upstream server that answered
    #[serde(default)]
    pub resolver: Option<String>,
    /// Liveness flag (0/1 on the wire)
    #[serde(default, with = "alive_flag")]
    pub alive: Option<bool>,
    /// Collection module that found it
    #[serde(default)]
    pub module: Option<String>,
    /// Collection source within the module
    #[serde(default)]
    pub source: Option<String>,
}

impl Record {
    /// Unresolved record for `subdomain` with no metadata.
    pub fn new(subdomain: impl Into<String>) -> Self {
        Record {
            subdomain: subdomain.into(),
            ..Default::default()
        }
    }

    /// True once an address has been filled in.
    pub fn has_ip(&self) -> bool {
        !self.ip.is_empty()
    }
}
