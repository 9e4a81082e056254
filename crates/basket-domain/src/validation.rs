use basket_core::{BasketError, BasketResult};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_NAME_LENGTH: usize = 3;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\p{N} ]+$").unwrap());

static ITEMS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\p{N} ,]*$").unwrap());

/// Checks a list name: at least three characters, letters, digits and
/// spaces only.
pub fn validate_list_name(name: &str) -> BasketResult<()> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(BasketError::Validation(format!(
            "list name must have at least {} characters",
            MIN_NAME_LENGTH
        )));
    }
    if !NAME_RE.is_match(trimmed) {
        return Err(BasketError::Validation(
            "list name may only contain letters, digits and spaces".to_string(),
        ));
    }
    Ok(())
}

/// Checks raw items input. Only letters, digits, spaces and the comma
/// separator are allowed, which keeps commas out of item names.
pub fn validate_items_input(input: &str) -> BasketResult<()> {
    if !ITEMS_RE.is_match(input) {
        return Err(BasketError::Validation(
            "items may only contain letters, digits, spaces and \", \" as separator".to_string(),
        ));
    }
    Ok(())
}

/// Case-insensitive name comparison used for uniqueness checks.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
