use crate::utils::error::{CorreiosError, Result};

/// Minimum dimensions the Correios contract API accepts. Anything below is
/// silently raised to the floor before transmission.
pub const PESO_MINIMO_KG: f64 = 0.3;
pub const COMPRIMENTO_MINIMO_CM: f64 = 16.0;
pub const LARGURA_MINIMA_CM: f64 = 11.0;
pub const ALTURA_MINIMA_CM: f64 = 2.0;

/// Strips every non-digit character from a CEP and requires exactly 8 digits.
pub fn normalize_cep(field_name: &str, cep: &str) -> Result<String> {
    let digits: String = cep.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 {
        return Err(CorreiosError::validation(format!(
            "{field_name} must contain exactly 8 digits, got {:?}",
            cep
        )));
    }
    Ok(digits)
}

/// Floors a dimension at its minimum; `None` means "use the minimum".
pub fn clamp_dimension(value: Option<f64>, minimum: f64) -> f64 {
    value.unwrap_or(minimum).max(minimum)
}

/// Weight travels on the wire in whole grams.
pub fn weight_to_grams(peso_kg: f64) -> i64 {
    (peso_kg * 1000.0).round() as i64
}

/// Dimensions travel on the wire in whole centimeters.
pub fn round_dimension(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cep_strips_formatting() {
        assert_eq!(normalize_cep("cepDestino", "01310-100").unwrap(), "01310100");
        assert_eq!(normalize_cep("cepDestino", " 01 310 100 ").unwrap(), "01310100");
        assert_eq!(normalize_cep("cepDestino", "01310100").unwrap(), "01310100");
    }

    #[test]
    fn test_normalize_cep_rejects_wrong_length() {
        assert!(normalize_cep("cepDestino", "0131010").is_err());
        assert!(normalize_cep("cepDestino", "013101000").is_err());
        assert!(normalize_cep("cepDestino", "").is_err());
        assert!(normalize_cep("cepDestino", "abc").is_err());
    }

    #[test]
    fn test_clamp_dimension_floors_at_minimum() {
        assert_eq!(clamp_dimension(Some(0.1), PESO_MINIMO_KG), PESO_MINIMO_KG);
        assert_eq!(clamp_dimension(Some(0.5), PESO_MINIMO_KG), 0.5);
        assert_eq!(clamp_dimension(None, COMPRIMENTO_MINIMO_CM), 16.0);
        assert_eq!(clamp_dimension(Some(20.0), COMPRIMENTO_MINIMO_CM), 20.0);
    }

    #[test]
    fn test_weight_to_grams_rounds() {
        assert_eq!(weight_to_grams(0.5), 500);
        assert_eq!(weight_to_grams(0.3), 300);
        assert_eq!(weight_to_grams(0.5554), 555);
        assert_eq!(weight_to_grams(0.5555), 556);
    }

    #[test]
    fn test_round_dimension() {
        assert_eq!(round_dimension(16.4), 16);
        assert_eq!(round_dimension(16.5), 17);
    }
}
