//! Citizen accounts: registration input and the public user view.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::schema::{impl_try_from_value, FieldReader, Schema};

/// Fields shared by every user record. The phone number is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct UserBase {
    pub phone_number: String,
}

impl Schema for UserBase {
    const NAME: &'static str = "UserBase";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let phone_number = fields.required("phone_number");
        Some(Self {
            phone_number: phone_number?,
        })
    }
}

/// Registration payload. The password is plaintext here; hashing belongs to
/// the account service that consumes this record.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct UserCreate {
    #[serde(flatten)]
    pub base: UserBase,
    pub name: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
    pub area: Option<String>,
}

impl UserCreate {
    pub fn phone_number(&self) -> &str {
        &self.base.phone_number
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("phone_number", &self.base.phone_number)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("area", &self.area)
            .finish()
    }
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

impl Schema for UserCreate {
    const NAME: &'static str = "UserCreate";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let base = UserBase::read(fields);
        let name = fields.required("name");
        let password: Option<String> = fields.required("password");
        let area = fields.optional("area");
        Some(Self {
            base: base?,
            name: name?,
            password: SecretString::new(password?),
            area: area?,
        })
    }
}

/// Public view of a stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    pub base: UserBase,
    pub name: Option<String>,
    pub area: Option<String>,
    pub is_active: bool,
}

/// Accessors a persisted user must expose to be viewed as a [`User`].
pub trait UserAttributes {
    fn id(&self) -> i64;
    fn phone_number(&self) -> &str;
    fn name(&self) -> Option<&str>;
    fn area(&self) -> Option<&str>;
    fn is_active(&self) -> bool;
}

impl User {
    /// Build the view from any persisted user, whatever its concrete type.
    pub fn from_attributes<A: UserAttributes + ?Sized>(source: &A) -> Self {
        Self {
            id: source.id(),
            base: UserBase {
                phone_number: source.phone_number().to_string(),
            },
            name: source.name().map(str::to_string),
            area: source.area().map(str::to_string),
            is_active: source.is_active(),
        }
    }

    pub fn phone_number(&self) -> &str {
        &self.base.phone_number
    }
}

impl UserAttributes for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn phone_number(&self) -> &str {
        &self.base.phone_number
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Schema for User {
    const NAME: &'static str = "User";

    fn read(fields: &mut FieldReader<'_>) -> Option<Self> {
        let base = UserBase::read(fields);
        let id = fields.required("id");
        let name = fields.optional("name");
        let area = fields.optional("area");
        let is_active = fields.required("is_active");
        Some(Self {
            id: id?,
            base: base?,
            name: name?,
            area: area?,
            is_active: is_active?,
        })
    }
}

impl_try_from_value!(UserBase, UserCreate, User);
