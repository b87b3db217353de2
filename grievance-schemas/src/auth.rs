//! Token shapes exchanged with the token-issuing service.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{impl_try_from_value, FieldReader, Schema};

/// Auth response handed back after a successful login
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer<T: Into<String>>(access_token: T) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl Schema for Token {
    const NAME: &'static str = "Token";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let access_token = fields.required("access_token");
        let token_type = fields.required("token_type");
        Some(Self {
            access_token: access_token?,
            token_type: token_type?,
        })
    }
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct TokenData {
    pub phone_number: Option<String>,
}

impl Schema for TokenData {
    const NAME: &'static str = "TokenData";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let phone_number = fields.optional("phone_number");
        Some(Self {
            phone_number: phone_number?,
        })
    }
}

impl_try_from_value!(Token, TokenData);
