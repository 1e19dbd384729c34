//! The record shapes this crate ships with.

use crate::bounded::BoundedList;
use crate::email::EmailAddress;
use crate::path::FieldPath;
use crate::record::{read_record, Context, FieldValue, ObjectReader, Shape};
use crate::types::{FieldSchema, FieldType, ShapeSchema};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub const MAX_PRODUCTS: usize = 100;

/// A user with no constraints beyond field types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub email: String,
}

impl Shape for User {
    const NAME: &'static str = "User";

    fn schema() -> ShapeSchema {
        ShapeSchema {
            name: Self::NAME,
            fields: vec![
                FieldSchema::required("name", String::field_type()),
                FieldSchema::required("age", i64::field_type()),
                FieldSchema::required("email", String::field_type()),
            ],
        }
    }

    fn read(fields: &mut ObjectReader<'_>) -> Option<Self> {
        let name = fields.required("name");
        let age = fields.required("age");
        let email = fields.required("email");
        Some(Self {
            name: name?,
            age: age?,
            email: email?,
        })
    }
}

/// A user whose email must be a syntactically valid address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedUser {
    pub name: String,
    pub age: i64,
    pub email: EmailAddress,
}

impl Shape for VerifiedUser {
    const NAME: &'static str = "VerifiedUser";

    fn schema() -> ShapeSchema {
        ShapeSchema {
            name: Self::NAME,
            fields: vec![
                FieldSchema::required("name", String::field_type()),
                FieldSchema::required("age", i64::field_type()),
                FieldSchema::required("email", EmailAddress::field_type()),
            ],
        }
    }

    fn read(fields: &mut ObjectReader<'_>) -> Option<Self> {
        let name = fields.required("name");
        let age = fields.required("age");
        let email = fields.required("email");
        Some(Self {
            name: name?,
            age: age?,
            email: email?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub tag_line: Option<String>,
}

impl Shape for Product {
    const NAME: &'static str = "Product";

    fn schema() -> ShapeSchema {
        ShapeSchema {
            name: Self::NAME,
            fields: vec![
                FieldSchema::required("name", String::field_type()),
                FieldSchema::required("price", f64::field_type()),
                FieldSchema::required("currency", String::field_type()),
                FieldSchema::optional("tag_line", String::field_type()),
            ],
        }
    }

    fn read(fields: &mut ObjectReader<'_>) -> Option<Self> {
        let name = fields.required("name");
        let price = fields.required("price");
        let currency = fields.required("currency");
        let tag_line = fields.optional("tag_line");
        Some(Self {
            name: name?,
            price: price?,
            currency: currency?,
            tag_line: tag_line?,
        })
    }
}

impl FieldValue for Product {
    fn field_type() -> FieldType {
        FieldType::Record { shape: Self::NAME }
    }

    fn from_field(value: &Value, path: &FieldPath, ctx: &mut Context) -> Option<Self> {
        read_record(value, path, ctx)
    }
}

/// Up to [`MAX_PRODUCTS`] products, validated as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    pub products: BoundedList<Product, 0, MAX_PRODUCTS>,
}

impl Shape for ProductResponse {
    const NAME: &'static str = "ProductResponse";

    fn schema() -> ShapeSchema {
        ShapeSchema {
            name: Self::NAME,
            fields: vec![FieldSchema::required(
                "products",
                BoundedList::<Product, 0, MAX_PRODUCTS>::field_type(),
            )],
        }
    }

    fn read(fields: &mut ObjectReader<'_>) -> Option<Self> {
        let products = fields.required("products");
        Some(Self {
            products: products?,
        })
    }
}

struct OptionalText<'a>(&'a Option<String>);

impl fmt::Display for OptionalText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(text) => write!(f, "{:?}", text),
            None => f.write_str("null"),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User(name={:?}, age={}, email={:?})",
            self.name, self.age, self.email
        )
    }
}

impl fmt::Display for VerifiedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VerifiedUser(name={:?}, age={}, email={:?})",
            self.name,
            self.age,
            self.email.as_str()
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the fractional part on whole floats: 30.0, not 30.
        write!(
            f,
            "Product(name={:?}, price={:?}, currency={:?}, tag_line={})",
            self.name,
            self.price,
            self.currency,
            OptionalText(&self.tag_line)
        )
    }
}

impl fmt::Display for ProductResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProductResponse(products=[")?;
        for (i, product) in self.products.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", product)?;
        }
        f.write_str("])")
    }
}
