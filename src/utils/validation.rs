//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y normalización de campos.

use validator::ValidationError;

/// Normalizar placa: recorta espacios y pasa a mayúsculas.
/// La unicidad de placas se verifica siempre sobre la forma normalizada.
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número de contacto: 11 dígitos empezando en 09
pub fn validate_contact_number(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 11
        && value.starts_with("09")
        && value.chars().all(|c| c.is_ascii_digit());
    if !valid {
        let mut error = ValidationError::new("contact_number");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"11 digits starting with 09".to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate(" abc123 "), "ABC123");
        assert_eq!(normalize_plate("ABC123"), "ABC123");
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_contact_number() {
        assert!(validate_contact_number("09171234567").is_ok());
        assert!(validate_contact_number("08171234567").is_err());
        assert!(validate_contact_number("0917123456").is_err());
        assert!(validate_contact_number("09171234a67").is_err());
    }
}
