//! Display-name rules.

use tictactoe_core::error::DomainError;

/// Maximum length of a player name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Validates a player name and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank or longer than
/// `MAX_NAME_LEN` characters.
pub fn validate_player_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "player name must not be blank".to_owned(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::Validation(format!(
            "player name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(validate_player_name("  Alice ").unwrap(), "Alice");
    }

    #[test]
    fn test_blank_and_overlong_names_are_rejected() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        for bad in ["", "   ", long.as_str()] {
            assert!(matches!(
                validate_player_name(bad),
                Err(DomainError::Validation(_))
            ));
        }
        assert!(validate_player_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }
}
