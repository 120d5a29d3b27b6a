//! Conversion of `validator` failures into [`AppError`].

use linkhub_core::AppError;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Validate a value and flatten any failures into a single validation error.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::validation(describe(&errors)))
}

/// Render validation errors as `field: message` pairs in a stable order.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect(errors, None, &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    if *field == "__all__" {
                        out.push(message);
                    } else {
                        out.push(format!("{path}: {message}"));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Reject strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Accept `#RRGGBB` colour codes.
pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("must look like #RRGGBB".into());
        return Err(err);
    }
    Ok(())
}

/// Accept three upper-case ASCII letters.
pub fn currency_code(value: &str) -> Result<(), ValidationError> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_uppercase()) {
        let mut err = ValidationError::new("currency");
        err.message = Some("must be a three-letter ISO 4217 code".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("x").is_ok());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(hex_color("#1a2B3c").is_ok());
        assert!(hex_color("1a2b3c").is_err());
        assert!(hex_color("#12345").is_err());
        assert!(hex_color("#12345g").is_err());
    }

    #[test]
    fn test_currency_code() {
        assert!(currency_code("TRY").is_ok());
        assert!(currency_code("try").is_err());
        assert!(currency_code("EURO").is_err());
    }
}
