use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Consumer,
    Promoter,
    Reviewer,
    Admin,
}

#[derive(Debug, Error)]
#[error("Unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Consumer => "CONSUMER",
            AccountType::Promoter => "PROMOTER",
            AccountType::Reviewer => "REVIEWER",
            AccountType::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONSUMER" => Ok(AccountType::Consumer),
            "PROMOTER" => Ok(AccountType::Promoter),
            "REVIEWER" => Ok(AccountType::Reviewer),
            "ADMIN" => Ok(AccountType::Admin),
            _ => Err(UnknownAccountType(s.to_string())),
        }
    }
}

impl TryFrom<String> for AccountType {
    type Error = UnknownAccountType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accounts are owned by the registration collaborator; the core only reads id and type.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: String, name: String, account_type: AccountType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            account_type,
            created_at: Utc::now(),
        }
    }

    pub fn is_promoter(&self) -> bool {
        self.account_type == AccountType::Promoter
    }
}
