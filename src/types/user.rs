use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UsersError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    #[serde(flatten)]
    pub fields: UserDraft,
}

/// A user record without an id; the input to create and the value the forms edit.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

impl User {
    pub fn new(id: u64, fields: UserDraft) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

impl UserDraft {
    /// Check the required fields. Optional fields are accepted as given.
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(UsersError::InvalidUser {
                field: "email",
                reason: format!("'{}' is not an email address", self.email),
            });
        }
        require("street", &self.address.street)?;
        require("suite", &self.address.suite)?;
        require("city", &self.address.city)?;
        require("zipcode", &self.address.zipcode)?;
        Ok(())
    }
}

impl Address {
    /// Two-line postal form: "street, suite" then "city, zipcode".
    pub fn lines(&self) -> (String, String) {
        (
            format!("{}, {}", self.street, self.suite),
            format!("{}, {}", self.city, self.zipcode),
        )
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(UsersError::InvalidUser {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_draft(name: &str, email: &str) -> UserDraft {
    UserDraft {
        name: name.to_string(),
        email: email.to_string(),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
        },
        ..UserDraft::default()
    }
}
