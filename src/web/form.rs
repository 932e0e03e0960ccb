//! Form-encoded input decoding
//!
//! Fields arrive as strings exactly as typed into the page. Rates are entered
//! as percentages and converted to fractions here, so the engine only ever
//! sees annual rates such as 0.05.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeaseError, LeaseResult};
use crate::lease::LeaseParameters;

/// Date format used by the HTML date input
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form fields as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseForm {
    pub full_rental: String,
    /// Percentage, e.g. "6" for 6%
    pub slc_interest_rate: String,
    /// Percentage
    pub inhouse_interest_rate: String,
    pub slc_nper: String,
    pub full_term: String,
    pub start_date: String,
    pub rental_increase_percentage: String,
    pub rental_increase_month: String,
}

impl LeaseForm {
    /// Decode an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &str) -> LeaseResult<Self> {
        serde_urlencoded::from_str(body)
            .map_err(|e| LeaseError::invalid("form", format!("malformed form body: {}", e)))
    }

    /// Coerce every field and validate the resulting parameter set
    pub fn to_parameters(&self) -> LeaseResult<LeaseParameters> {
        LeaseParameters::new(
            parse_decimal("full_rental", &self.full_rental)?,
            parse_decimal("slc_interest_rate", &self.slc_interest_rate)? / 100.0,
            parse_decimal("inhouse_interest_rate", &self.inhouse_interest_rate)? / 100.0,
            parse_integer("slc_nper", &self.slc_nper)?,
            parse_integer("full_term", &self.full_term)?,
            parse_date("start_date", &self.start_date)?,
            parse_decimal("rental_increase_percentage", &self.rental_increase_percentage)?,
            parse_month("rental_increase_month", &self.rental_increase_month)?,
        )
    }
}

fn required<'a>(field: &str, value: &'a str) -> LeaseResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LeaseError::invalid(field, "is required"))
    } else {
        Ok(trimmed)
    }
}

fn parse_decimal(field: &str, value: &str) -> LeaseResult<f64> {
    let raw = required(field, value)?;
    let parsed: f64 = raw
        .parse()
        .map_err(|_| LeaseError::invalid(field, format!("'{}' is not a number", raw)))?;
    if !parsed.is_finite() {
        return Err(LeaseError::invalid(field, format!("'{}' is not a finite number", raw)));
    }
    Ok(parsed)
}

fn parse_integer(field: &str, value: &str) -> LeaseResult<i32> {
    let raw = required(field, value)?;
    raw.parse()
        .map_err(|_| LeaseError::invalid(field, format!("'{}' is not a whole number", raw)))
}

fn parse_month(field: &str, value: &str) -> LeaseResult<u32> {
    let month = parse_integer(field, value)?;
    u32::try_from(month)
        .map_err(|_| LeaseError::invalid(field, format!("must be between 1 and 12, got {}", month)))
}

fn parse_date(field: &str, value: &str) -> LeaseResult<NaiveDate> {
    let raw = required(field, value)?;
    NaiveDate::parse_from_str(raw, FORM_DATE_FORMAT)
        .map_err(|_| LeaseError::invalid(field, format!("'{}' is not a date (expected YYYY-MM-DD)", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "full_rental=1000&slc_interest_rate=6&inhouse_interest_rate=8&slc_nper=12\
        &full_term=24&start_date=2024-01-01&rental_increase_percentage=5&rental_increase_month=1";

    #[test]
    fn test_decode_and_convert() {
        let form = LeaseForm::from_urlencoded(BODY).unwrap();
        assert_eq!(form.full_rental, "1000");

        let params = form.to_parameters().unwrap();
        assert!((params.slc_interest_rate - 0.06).abs() < 1e-12);
        assert!((params.inhouse_interest_rate - 0.08).abs() < 1e-12);
        assert_eq!(params.slc_nper, 12);
        assert_eq!(params.full_term, 24);
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(params.rental_increase_month, 1);
    }

    #[test]
    fn test_missing_field_is_named() {
        let form = LeaseForm::from_urlencoded("full_rental=1000").unwrap();
        let err = form.to_parameters().unwrap_err();
        assert_eq!(err.field(), Some("slc_interest_rate"));
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn test_unparseable_values() {
        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.full_term = "twelve".to_string();
        assert_eq!(form.to_parameters().unwrap_err().field(), Some("full_term"));

        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.start_date = "01/01/2024".to_string();
        assert_eq!(form.to_parameters().unwrap_err().field(), Some("start_date"));

        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.full_rental = "inf".to_string();
        assert_eq!(form.to_parameters().unwrap_err().field(), Some("full_rental"));
    }

    #[test]
    fn test_negative_month_rejected() {
        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.rental_increase_month = "-2".to_string();
        assert_eq!(form.to_parameters().unwrap_err().field(), Some("rental_increase_month"));
    }

    #[test]
    fn test_non_positive_rental_rejected() {
        for rental in ["0", "-1000"] {
            let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
            form.full_rental = rental.to_string();
            assert_eq!(form.to_parameters().unwrap_err().field(), Some("full_rental"));
        }
    }

    #[test]
    fn test_rental_wiping_decrease_rejected() {
        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.rental_increase_percentage = "-250".to_string();
        assert_eq!(
            form.to_parameters().unwrap_err().field(),
            Some("rental_increase_percentage")
        );

        form.rental_increase_percentage = "-10".to_string();
        assert!(form.to_parameters().is_ok());
    }

    #[test]
    fn test_range_errors_come_from_validation() {
        let mut form = LeaseForm::from_urlencoded(BODY).unwrap();
        form.slc_nper = "30".to_string();
        assert_eq!(form.to_parameters().unwrap_err().field(), Some("slc_nper"));
    }
}
