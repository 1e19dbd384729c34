//! Email address syntax checking.
//!
//! # Rules
//!
//! - exactly one `@`, with a non-empty local part and domain
//! - at most 254 characters overall, 64 in the local part
//! - the local part is dot-separated atoms of letters, digits and
//!   ``!#$%&'*+-/=?^_`{|}~``
//! - the domain has two or more labels of letters, digits and hyphens; labels
//!   are 1 to 63 characters, never start or end with a hyphen, and the last
//!   label is not purely numeric
//!
//! Deliverability is never checked.

use crate::error::FieldErrorKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const MAX_ADDRESS_LEN: usize = 254;
pub const MAX_LOCAL_LEN: usize = 64;
pub const MAX_LABEL_LEN: usize = 63;

/// A syntactically valid email address with a lowercased domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, FieldErrorKind> {
        let address = raw.trim();
        let reason = |reason: &str| FieldErrorKind::Email {
            reason: reason.to_string(),
        };

        let (local, domain) = match address.split_once('@') {
            Some(parts) => parts,
            None => return Err(reason("An email address must have an @-sign.")),
        };
        if domain.contains('@') {
            return Err(reason("The email address contains more than one @-sign."));
        }
        if local.is_empty() {
            return Err(reason("There must be something before the @-sign."));
        }
        if domain.is_empty() {
            return Err(reason("There must be something after the @-sign."));
        }
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(reason("The email address is too long."));
        }
        if local.chars().count() > MAX_LOCAL_LEN {
            return Err(reason("The email address is too long before the @-sign."));
        }

        check_local(local).map_err(reason)?;
        check_domain(domain).map_err(reason)?;

        Ok(EmailAddress(format!("{}@{}", local, domain.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_local(local: &str) -> Result<(), &'static str> {
    if local.starts_with('.') {
        return Err("An email address cannot start with a period.");
    }
    if local.ends_with('.') {
        return Err("An email address cannot have a period immediately before the @-sign.");
    }
    if local.contains("..") {
        return Err("An email address cannot have two periods in a row.");
    }
    if !local.chars().all(is_atom_char) {
        return Err("The part before the @-sign contains invalid characters.");
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err("The part after the @-sign is not valid. It should have a period.");
    }
    for label in &labels {
        if label.is_empty() {
            return Err("The part after the @-sign contains an empty label.");
        }
        if label.len() > MAX_LABEL_LEN {
            return Err("The part after the @-sign contains a label that is too long.");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("A label after the @-sign cannot start or end with a hyphen.");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("The part after the @-sign contains invalid characters.");
        }
    }
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return Err("The part after the @-sign is not valid. It is not within a valid top-level domain.");
    }
    Ok(())
}

const fn is_atom_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '=' | '?' | '^' | '_'
                | '`' | '{' | '|' | '}' | '~' | '.'
        )
}

impl FromStr for EmailAddress {
    type Err = FieldErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailAddress::parse(s)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(raw: &str) -> String {
        match EmailAddress::parse(raw) {
            Err(FieldErrorKind::Email { reason }) => reason,
            other => panic!("expected email error for {:?}, got {:?}", raw, other),
        }
    }

    #[test]
    fn test_accepts_plain_address() {
        let email = EmailAddress::parse("alice@example.com").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_accepts_tagged_and_subdomain_addresses() {
        assert!(EmailAddress::parse("alice.smith+news@mail.example.co.uk").is_ok());
        assert!(EmailAddress::parse("o'brien@my-host.org").is_ok());
    }

    #[test]
    fn test_domain_is_lowercased_and_input_trimmed() {
        let email = EmailAddress::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "Alice@example.com");
    }

    #[test]
    fn test_rejects_missing_at_sign() {
        assert_eq!(reason_of("not-an-email"), "An email address must have an @-sign.");
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert_eq!(reason_of("@example.com"), "There must be something before the @-sign.");
        assert_eq!(reason_of("alice@"), "There must be something after the @-sign.");
    }

    #[test]
    fn test_rejects_bad_local_parts() {
        assert!(reason_of(".alice@example.com").contains("start with a period"));
        assert!(reason_of("alice.@example.com").contains("period immediately before"));
        assert!(reason_of("al..ice@example.com").contains("two periods"));
        assert!(reason_of("al ice@example.com").contains("invalid characters"));
    }

    #[test]
    fn test_rejects_bad_domains() {
        assert!(reason_of("alice@localhost").contains("should have a period"));
        assert!(reason_of("alice@example..com").contains("empty label"));
        assert!(reason_of("alice@-example.com").contains("hyphen"));
        assert!(reason_of("alice@exa_mple.com").contains("invalid characters"));
        assert!(reason_of("alice@10.0.0.1").contains("top-level domain"));
        assert!(reason_of("a@b@example.com").contains("more than one @-sign"));
    }

    #[test]
    fn test_rejects_overlong_local_part() {
        let local = "a".repeat(MAX_LOCAL_LEN + 1);
        assert!(reason_of(&format!("{}@example.com", local)).contains("too long"));
    }
}
