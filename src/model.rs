//! Entities as stored and as sent over the wire, plus request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, sqlx::FromRow, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "Ana")]
    pub name: String,
}

#[derive(Serialize, Deserialize, sqlx::FromRow, ToSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Texto")]
    pub content: String,
    pub create_at: DateTime<Utc>,
    #[schema(example = 1)]
    pub author_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct NewUsuario {
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "Ana")]
    pub name: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
pub struct UsuarioPatch {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UsuarioPatch {
    pub fn apply(&self, usuario: &mut Usuario) {
        if let Some(email) = &self.email {
            usuario.email = email.clone();
        }
        if let Some(name) = &self.name {
            usuario.name = name.clone();
        }
    }
}

/// Ticket creation body. Every field is optional at this layer so the author can be
/// resolved before anything else is checked.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    #[serde(default)]
    #[schema(value_type = String, example = "Texto")]
    pub content: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date, example = "2017-01-01")]
    pub create_at: Option<RawDate>,
    /// `None` only when the key is missing; an explicit `null` is kept as [`RawId::Other`].
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = i64, example = 1)]
    pub author_id: Option<RawId>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A ticket ready for insertion: author resolved, date normalized.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub content: String,
    pub create_at: DateTime<Utc>,
    pub author_id: i32,
}

/// Identifier as a client sent it. Numbers and strings may name a row; any other
/// JSON value never does but is still echoed back in error messages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl RawId {
    /// Integer id, or `None` when the value is not an integral `i32`.
    pub fn to_id(&self) -> Option<i32> {
        match self {
            RawId::Int(n) => i32::try_from(*n).ok(),
            RawId::Float(f) => float_to_id(*f),
            RawId::Text(s) => crate::service::parse_id(s),
            RawId::Other(_) => None,
        }
    }
}

pub(crate) fn float_to_id(f: f64) -> Option<i32> {
    if f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
        Some(f as i32)
    } else {
        None
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{}", n),
            RawId::Float(x) => write!(f, "{}", x),
            RawId::Text(s) => f.write_str(s),
            RawId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Date as a client sent it: epoch milliseconds or a date/timestamp string.
/// Anything else lands in `Other` and is rejected during normalization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawDate {
    Millis(i64),
    Text(String),
    Other(Value),
}
