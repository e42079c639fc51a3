use crate::error::{CoreError, CoreResult};

pub const USERNAME_LENGTH_MIN: usize = 5;
pub const USERNAME_LENGTH_MAX: usize = 20;
pub const JOKE_LENGTH_MIN: usize = 10;
pub const JOKE_LENGTH_MAX: usize = 1000;

/// Usernames: 5-20 chars from `[A-Za-z0-9_-]`. Character check runs first so
/// a short name full of garbage reports the garbage.
pub fn username(raw: &str) -> CoreResult<()> {
    let only_allowed = raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !only_allowed {
        return Err(CoreError::InvalidCharacters);
    }

    let length = raw.chars().count();
    if length < USERNAME_LENGTH_MIN {
        return Err(CoreError::TooShort);
    }
    if length > USERNAME_LENGTH_MAX {
        return Err(CoreError::TooLong);
    }

    Ok(())
}

/// Joke bodies: 10-1000 chars, any content.
pub fn joke_body(raw: &str) -> CoreResult<()> {
    let length = raw.chars().count();
    if length < JOKE_LENGTH_MIN {
        return Err(CoreError::TooShort);
    }
    if length > JOKE_LENGTH_MAX {
        return Err(CoreError::TooLong);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    #[test]
    fn username_rules() {
        assert_debug_snapshot!(username("valid_name-1"), @"Ok(())");
        assert_debug_snapshot!(username("ab"), @"Err(TooShort)");
        assert_debug_snapshot!(username(&"a".repeat(21)), @"Err(TooLong)");
        assert_debug_snapshot!(username("has spaces!"), @"Err(InvalidCharacters)");
        // Character check wins over length when both fail.
        assert_debug_snapshot!(username("é"), @"Err(InvalidCharacters)");
    }

    #[test]
    fn joke_body_rules() {
        assert_debug_snapshot!(joke_body("why did the chicken cross the road"), @"Ok(())");
        assert_debug_snapshot!(joke_body("too short"), @"Err(TooShort)");
        assert_debug_snapshot!(joke_body(&"ha".repeat(501)), @"Err(TooLong)");
    }

    #[test]
    fn joke_body_length_counts_chars_not_bytes() {
        // Ten chars, more than ten bytes.
        assert_debug_snapshot!(joke_body("héhéhéhéhé"), @"Ok(())");
    }
}
