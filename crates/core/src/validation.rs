//! Write-side input checks.
//!
//! Reads are tolerant; writes are not. Request bodies are resolved into
//! `Validate` structs and checked here before anything reaches the store.

use validator::Validate;

use crate::error::CoreError;

/// Run `validator` rules and map failures to [`CoreError::Validation`].
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}

/// Trimmed value, or `None` if missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-blank candidate, trimmed. Used to resolve `name` vs its alias.
pub fn first_non_blank(candidates: &[Option<&str>]) -> Option<String> {
    candidates.iter().find_map(|c| non_blank(*c))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 2, max = 5, message = "name must be 2-5 characters"))]
        name: String,
    }

    #[test]
    fn validate_passes_good_input() {
        assert!(validate(&Named { name: "Rex".into() }).is_ok());
    }

    #[test]
    fn validate_reports_constraint() {
        let err = validate(&Named { name: "R".into() });
        assert_matches!(
            err,
            Err(CoreError::Validation(msg)) if msg.contains("name must be 2-5 characters")
        );
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  Rex ")), Some("Rex".into()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn first_non_blank_skips_empty_candidates() {
        assert_eq!(first_non_blank(&[Some(""), Some(" Fido ")]), Some("Fido".into()));
        assert_eq!(first_non_blank(&[Some("Rex"), Some("Fido")]), Some("Rex".into()));
        assert_eq!(first_non_blank(&[None, None]), None);
    }
}
