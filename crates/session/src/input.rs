//! Token validation for prompt answers.
//!
//! Each function is a pure check returning a typed result; the prompt loops
//! decide what to do with a failure (usually: explain, ask again).

use orderdesk_core::{DomainError, DomainResult};

/// Parse a yes/no answer.
///
/// Input is case-normalized to the two canonical tokens `Y` and `N`;
/// anything else is an [`DomainError::InvalidResponse`].
pub fn parse_yes_no(token: &str) -> DomainResult<bool> {
    let trimmed = token.trim();
    match trimmed.to_ascii_uppercase().as_str() {
        "Y" => Ok(true),
        "N" => Ok(false),
        _ => Err(DomainError::InvalidResponse(trimmed.to_string())),
    }
}

/// Parse a purchase quantity: a positive whole number.
pub fn parse_quantity(token: &str) -> DomainResult<u32> {
    let quantity: u32 = token
        .trim()
        .parse()
        .map_err(|e| DomainError::validation(format!("quantity: {e}")))?;
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }
    Ok(quantity)
}
