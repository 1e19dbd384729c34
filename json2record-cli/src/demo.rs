//! Walkthroughs of the bundled shapes, printed in order.

use anyhow::Result;
use json2record_lib::*;
use serde_json::json;
use std::io::Write;
use tracing::info;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    let options = ValidationOptions::default();

    info!("basic user");
    let data = json!({"name": "Alice", "age": 30, "email": "alice@example.com"});
    let user = User::validate(&data)?;
    writeln!(out, "{}", user)?;

    info!("user with a checked email");
    let user = run_with_policy::<VerifiedUser, _>(ErrorPolicy::Abort, &data, &options, out)?;
    if let Some(user) = user {
        writeln!(out, "{}", user)?;
    }

    info!("product response");
    let response_data = json!({
        "products": [
            {"name": "Laptop", "price": 999.99, "currency": "USD", "tag_line": "High performance"},
            {"name": "Smartphone", "price": 499.99, "currency": "USD"}
        ]
    });
    print_recovered::<ProductResponse, _>(&response_data, &options, out)?;

    info!("product response with a bad price");
    let invalid_data = json!({
        "products": [
            {"name": "Tablet", "price": "a lot", "currency": "USD"}
        ]
    });
    print_recovered::<ProductResponse, _>(&invalid_data, &options, out)?;

    Ok(())
}

/// Validates under the recover policy; a failure has already been printed.
fn print_recovered<S, W>(data: &serde_json::Value, options: &ValidationOptions, out: &mut W) -> Result<()>
where
    S: Shape + std::fmt::Display,
    W: Write,
{
    match run_with_policy::<S, _>(ErrorPolicy::Recover, data, options, out)? {
        Some(record) => writeln!(out, "{}", record)?,
        None => writeln!(out, "null")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], r#"User(name="Alice", age=30, email="alice@example.com")"#);
        assert_eq!(lines[1], r#"VerifiedUser(name="Alice", age=30, email="alice@example.com")"#);
        assert!(lines[2].starts_with(r#"ProductResponse(products=[Product(name="Laptop""#));
        assert!(lines[2].ends_with("tag_line=null)])"));
        assert_eq!(lines[3], "Validation error: 1 validation error for ProductResponse");
        assert_eq!(lines[4], "products.0.price");
        assert_eq!(lines.last(), Some(&"null"));
    }
}
