//! Field validators for the person editor.
//!
//! Validators are pure functions from the raw field text to a [`FieldCheck`].
//! The editor only depends on that shape; the rules themselves live here.

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub invalid: bool,
    /// Empty when the field is valid.
    pub message: String,
}

impl FieldCheck {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            invalid: false,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            invalid: true,
            message: message.into(),
        }
    }
}

pub type Validator = fn(&str) -> FieldCheck;

/// Rejects blank input.
#[must_use]
pub fn first_name(value: &str) -> FieldCheck {
    required(value, "First name is required")
}

/// Rejects blank input.
#[must_use]
pub fn last_name(value: &str) -> FieldCheck {
    required(value, "Last name is required")
}

/// Optional; when present it must look like `local@domain.tld`.
///
/// ```
/// use contactbook::app::validation;
///
/// assert!(!validation::email("").invalid);
/// assert!(!validation::email("ada@example.org").invalid);
/// assert!(validation::email("ada@example").invalid);
/// ```
#[must_use]
pub fn email(value: &str) -> FieldCheck {
    let value = value.trim();
    if value.is_empty() {
        return FieldCheck::valid();
    }

    let well_formed = !value.chars().any(char::is_whitespace)
        && value.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });

    if well_formed {
        FieldCheck::valid()
    } else {
        FieldCheck::invalid("Invalid e-mail address")
    }
}

/// Optional; digits, spaces and `+ - ( )` only, with at least seven digits.
#[must_use]
pub fn phone(value: &str) -> FieldCheck {
    const MIN_DIGITS: usize = 7;

    let value = value.trim();
    if value.is_empty() {
        return FieldCheck::valid();
    }

    if let Some(bad) = value
        .chars()
        .find(|c| !c.is_ascii_digit() && !matches!(c, '+' | '-' | '(' | ')' | ' '))
    {
        return FieldCheck::invalid(format!("Unexpected character '{bad}' in phone number"));
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_DIGITS {
        return FieldCheck::invalid(format!("Phone number needs at least {MIN_DIGITS} digits"));
    }
    FieldCheck::valid()
}

fn required(value: &str, message: &str) -> FieldCheck {
    if value.trim().is_empty() {
        FieldCheck::invalid(message)
    } else {
        FieldCheck::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_required() {
        assert!(first_name("   ").invalid);
        assert!(!first_name("Ada").invalid);
        assert_eq!(last_name("").message, "Last name is required");
    }

    #[test]
    fn email_shapes() {
        for ok in ["", "a@b.co", "grace.hopper@navy.mil"] {
            assert!(!email(ok).invalid, "{ok} should be accepted");
        }
        for bad in ["ada", "@example.org", "ada@", "ada@example", "a b@c.de", "a@b@c.de", "a@.de"] {
            assert!(email(bad).invalid, "{bad} should be rejected");
        }
    }

    #[test]
    fn phone_shapes() {
        assert!(!phone("").invalid);
        assert!(!phone("+44 (20) 7946-0018").invalid);
        assert!(phone("12345").invalid);
        assert!(phone("555-CALL-NOW").invalid);
    }
}
