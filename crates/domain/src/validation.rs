use crate::error::{DomainError, Result};

/// Trims a required text field, rejecting blank values
pub(crate) fn required(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("{field} cannot be empty")));
    }

    Ok(trimmed.to_string())
}

/// Like [`required`] but for fields that may be absent
pub(crate) fn optional(field: &str, value: Option<String>) -> Result<Option<String>> {
    value.map(|v| required(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  English ").unwrap(), "English");
    }

    #[test]
    fn test_required_rejects_blank() {
        assert_eq!(
            required("name", "   "),
            Err(DomainError::InvalidInput("name cannot be empty".to_string()))
        );
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional("summary", None).unwrap(), None);
        assert_eq!(
            optional("summary", Some(" short ".into())).unwrap(),
            Some("short".to_string())
        );
        assert!(optional("summary", Some("".into())).is_err());
    }
}
