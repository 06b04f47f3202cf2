//! Input rules for node labels and BST numbers.

use crate::domain::error::{DomainError, DomainResult};

/// Maximum label length accepted by the value-entry prompt.
pub const MAX_LABEL_LEN: usize = 10;

/// Trims `input` and checks it is a non-empty label of at most
/// [`MAX_LABEL_LEN`] characters.
pub fn validate_label(input: &str) -> DomainResult<String> {
    let label = input.trim();
    if label.is_empty() {
        return Err(DomainError::EmptyValue);
    }
    let len = label.chars().count();
    if len > MAX_LABEL_LEN {
        return Err(DomainError::ValueTooLong {
            len,
            max: MAX_LABEL_LEN,
        });
    }
    Ok(label.to_string())
}

/// Parses one integer, surrounding whitespace allowed.
pub fn parse_number(input: &str) -> DomainResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyValue);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| DomainError::NotANumber(trimmed.to_string()))
}

/// Parses whitespace separated integers. Tokens that are not numbers are
/// skipped; it is an error only if nothing usable remains.
pub fn parse_number_list(input: &str) -> DomainResult<Vec<i64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyValue);
    }
    let numbers: Vec<i64> = trimmed
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect();
    if numbers.is_empty() {
        return Err(DomainError::NotANumber(trimmed.to_string()));
    }
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  A  ", Ok("A".to_string()))]
    #[case("abcdefghij", Ok("abcdefghij".to_string()))]
    #[case("", Err(DomainError::EmptyValue))]
    #[case("   ", Err(DomainError::EmptyValue))]
    #[case("abcdefghijk", Err(DomainError::ValueTooLong { len: 11, max: 10 }))]
    fn test_validate_label(#[case] input: &str, #[case] expected: DomainResult<String>) {
        assert_eq!(validate_label(input), expected);
    }

    #[rstest]
    #[case(" 42 ", Ok(42))]
    #[case("-7", Ok(-7))]
    #[case("", Err(DomainError::EmptyValue))]
    #[case("4x", Err(DomainError::NotANumber("4x".to_string())))]
    fn test_parse_number(#[case] input: &str, #[case] expected: DomainResult<i64>) {
        assert_eq!(parse_number(input), expected);
    }

    #[test]
    fn given_mixed_tokens_when_parsing_list_then_skips_invalid() {
        assert_eq!(parse_number_list("5 x 3\t8  ?"), Ok(vec![5, 3, 8]));
    }

    #[test]
    fn given_no_numbers_when_parsing_list_then_errors() {
        assert_eq!(
            parse_number_list("a b"),
            Err(DomainError::NotANumber("a b".to_string()))
        );
        assert_eq!(parse_number_list(" "), Err(DomainError::EmptyValue));
    }
}
