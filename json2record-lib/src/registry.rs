use crate::error::ValidationErrors;
use crate::models::{Product, ProductResponse, User, VerifiedUser};
use crate::record::Shape;
use crate::types::*;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The shapes selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeName {
    User,
    VerifiedUser,
    Product,
    ProductResponse,
}

impl ShapeName {
    pub const ALL: [ShapeName; 4] = [
        ShapeName::User,
        ShapeName::VerifiedUser,
        ShapeName::Product,
        ShapeName::ProductResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::User => "user",
            ShapeName::VerifiedUser => "verified-user",
            ShapeName::Product => "product",
            ShapeName::ProductResponse => "product-response",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    pub fn schema(&self) -> ShapeSchema {
        match self {
            ShapeName::User => User::schema(),
            ShapeName::VerifiedUser => VerifiedUser::schema(),
            ShapeName::Product => Product::schema(),
            ShapeName::ProductResponse => ProductResponse::schema(),
        }
    }

    pub fn validate(
        &self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<ValidatedRecord, ValidationErrors> {
        Ok(match self {
            ShapeName::User => ValidatedRecord::User(User::validate_with(value, options)?),
            ShapeName::VerifiedUser => {
                ValidatedRecord::VerifiedUser(VerifiedUser::validate_with(value, options)?)
            }
            ShapeName::Product => ValidatedRecord::Product(Product::validate_with(value, options)?),
            ShapeName::ProductResponse => {
                ValidatedRecord::ProductResponse(ProductResponse::validate_with(value, options)?)
            }
        })
    }
}

impl FromStr for ShapeName {
    type Err = Json2RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| Json2RecordError::UnknownShape(s.to_string()))
    }
}

impl fmt::Display for ShapeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record of any registered shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRecord {
    User(User),
    VerifiedUser(VerifiedUser),
    Product(Product),
    ProductResponse(ProductResponse),
}

impl ValidatedRecord {
    pub fn to_value(&self) -> Result<Value, Json2RecordError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Display for ValidatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatedRecord::User(r) => fmt::Display::fmt(r, f),
            ValidatedRecord::VerifiedUser(r) => fmt::Display::fmt(r, f),
            ValidatedRecord::Product(r) => fmt::Display::fmt(r, f),
            ValidatedRecord::ProductResponse(r) => fmt::Display::fmt(r, f),
        }
    }
}
