//! # Boolean Filters
//!
//! Query-string filters on the experiment flags.

use std::collections::HashMap;

use crate::experiment::Experiment;

use super::errors::{RestError, RestResult};

/// Flag an endpoint group lets clients filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    IsFirstRun,
    IsLocalized,
}

impl FilterField {
    /// Query parameter name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::IsFirstRun => "is_first_run",
            FilterField::IsLocalized => "is_localized",
        }
    }

    fn value_of(&self, experiment: &Experiment) -> bool {
        match self {
            FilterField::IsFirstRun => experiment.is_first_run,
            FilterField::IsLocalized => experiment.is_localized,
        }
    }
}

/// Equality filter on one boolean flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolFilter {
    pub field: FilterField,
    pub value: bool,
}

impl BoolFilter {
    pub fn new(field: FilterField, value: bool) -> Self {
        Self { field, value }
    }

    /// Read `field` from query parameters
    ///
    /// An absent or empty parameter yields no filter. Other parameters are
    /// ignored.
    pub fn from_query(
        field: FilterField,
        params: &HashMap<String, String>,
    ) -> RestResult<Option<Self>> {
        let raw = match params.get(field.as_str()) {
            Some(raw) if !raw.trim().is_empty() => raw.trim(),
            _ => return Ok(None),
        };

        let value = parse_bool(raw).ok_or_else(|| RestError::InvalidFilter {
            field: field.as_str(),
            value: raw.to_string(),
        })?;

        Ok(Some(Self::new(field, value)))
    }

    /// Check if an experiment matches this filter
    pub fn matches(&self, experiment: &Experiment) -> bool {
        self.field.value_of(experiment) == self.value
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::Status;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_accepted_spellings() {
        let cases = [
            ("true", true),
            ("True", true),
            ("1", true),
            ("FALSE", false),
            ("0", false),
        ];
        for (raw, expected) in cases {
            let params = query(&[("is_first_run", raw)]);
            let filter = BoolFilter::from_query(FilterField::IsFirstRun, &params)
                .unwrap()
                .unwrap();
            assert_eq!(filter.value, expected, "raw value {raw}");
        }
    }

    #[test]
    fn test_absent_or_empty_means_no_filter() {
        assert!(BoolFilter::from_query(FilterField::IsFirstRun, &query(&[])).unwrap().is_none());
        assert!(
            BoolFilter::from_query(FilterField::IsFirstRun, &query(&[("is_first_run", "")]))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_other_params_ignored() {
        let params = query(&[("is_localized", "true"), ("limit", "10")]);
        assert!(BoolFilter::from_query(FilterField::IsFirstRun, &params).unwrap().is_none());
    }

    #[test]
    fn test_invalid_value_rejected() {
        let params = query(&[("is_localized", "yes")]);
        let err = BoolFilter::from_query(FilterField::IsLocalized, &params).unwrap_err();
        assert!(matches!(err, RestError::InvalidFilter { field: "is_localized", .. }));
    }

    #[test]
    fn test_matches_flag() {
        let exp = Experiment::new("x", Status::Live).with_first_run(true);
        assert!(BoolFilter::new(FilterField::IsFirstRun, true).matches(&exp));
        assert!(!BoolFilter::new(FilterField::IsFirstRun, false).matches(&exp));
        assert!(BoolFilter::new(FilterField::IsLocalized, false).matches(&exp));
    }
}
