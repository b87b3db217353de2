//! Runtime selection of a record kind, for callers that only know the
//! schema by name (the operator CLI, generic request routers).

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use error_common::{GrievanceError, Result};

use crate::auth::{Token, TokenData};
use crate::complaints::{ComplaintAIResponse, ComplaintBase, ComplaintCreate};
use crate::config::ValidationConfig;
use crate::schema::Schema;
use crate::users::{User, UserBase, UserCreate};
use crate::workers::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    UserBase,
    UserCreate,
    User,
    Token,
    TokenData,
    ComplaintBase,
    ComplaintCreate,
    ComplaintAIResponse,
    Worker,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 9] = [
        Self::UserBase,
        Self::UserCreate,
        Self::User,
        Self::Token,
        Self::TokenData,
        Self::ComplaintBase,
        Self::ComplaintCreate,
        Self::ComplaintAIResponse,
        Self::Worker,
    ];

    /// Kebab-case name accepted by [`FromStr`]
    pub fn slug(self) -> &'static str {
        match self {
            Self::UserBase => "user-base",
            Self::UserCreate => "user-create",
            Self::User => "user",
            Self::Token => "token",
            Self::TokenData => "token-data",
            Self::ComplaintBase => "complaint-base",
            Self::ComplaintCreate => "complaint-create",
            Self::ComplaintAIResponse => "complaint-ai-response",
            Self::Worker => "worker",
        }
    }

    /// Record name as reported in validation errors
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::UserBase => UserBase::NAME,
            Self::UserCreate => UserCreate::NAME,
            Self::User => User::NAME,
            Self::Token => Token::NAME,
            Self::TokenData => TokenData::NAME,
            Self::ComplaintBase => ComplaintBase::NAME,
            Self::ComplaintCreate => ComplaintCreate::NAME,
            Self::ComplaintAIResponse => ComplaintAIResponse::NAME,
            Self::Worker => Worker::NAME,
        }
    }

    /// Validate `payload` as this kind and return the normalized record
    /// (coerced values, absent optionals as `null`, unknown keys dropped).
    pub fn normalize(self, payload: &Value, config: &ValidationConfig) -> Result<Value> {
        match self {
            Self::UserBase => to_normalized::<UserBase>(payload, config),
            Self::UserCreate => to_normalized::<UserCreate>(payload, config),
            Self::User => to_normalized::<User>(payload, config),
            Self::Token => to_normalized::<Token>(payload, config),
            Self::TokenData => to_normalized::<TokenData>(payload, config),
            Self::ComplaintBase => to_normalized::<ComplaintBase>(payload, config),
            Self::ComplaintCreate => to_normalized::<ComplaintCreate>(payload, config),
            Self::ComplaintAIResponse => to_normalized::<ComplaintAIResponse>(payload, config),
            Self::Worker => to_normalized::<Worker>(payload, config),
        }
    }
}

fn to_normalized<T: Schema + Serialize>(payload: &Value, config: &ValidationConfig) -> Result<Value> {
    let record = T::validate_with(payload, config)?;
    Ok(serde_json::to_value(record)?)
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SchemaKind {
    type Err = GrievanceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.schema_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.slug()).collect();
                GrievanceError::ConfigError(format!(
                    "unknown schema '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}
