//! Fitted categorical encoders.
//!
//! Both encoders are loaded from artifact files and must reproduce the
//! training-time mapping exactly: the label encoder maps a value to its index
//! within the fitted class list, and the one-hot encoder emits one indicator
//! column per known category in fitted order. An unseen value is an error,
//! never a silent default, because a wrong mapping would corrupt the
//! prediction without any visible failure.

use crate::error::AppError;

/// Fitted label encoding: value -> index within `classes`.
#[derive(Debug, Clone)]
pub struct LabelEncoding {
    feature: String,
    classes: Vec<String>,
}

impl LabelEncoding {
    pub fn new(feature: impl Into<String>, classes: Vec<String>) -> Result<Self, AppError> {
        let feature = feature.into();
        validate_categories(&feature, &classes)?;
        Ok(Self { feature, classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Encode a value as its fitted class index.
    pub fn encode(&self, value: &str) -> Result<f64, AppError> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|i| i as f64)
            .ok_or_else(|| {
                AppError::new(
                    3,
                    format!(
                        "Unknown {} '{value}'. Known: {}.",
                        self.feature,
                        self.classes.join(", ")
                    ),
                )
            })
    }
}

/// Fitted one-hot encoding: value -> indicator vector over `categories`.
#[derive(Debug, Clone)]
pub struct OneHotEncoding {
    feature: String,
    categories: Vec<String>,
}

impl OneHotEncoding {
    pub fn new(feature: impl Into<String>, categories: Vec<String>) -> Result<Self, AppError> {
        let feature = feature.into();
        validate_categories(&feature, &categories)?;
        Ok(Self { feature, categories })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Encode a value as one indicator per known category, fitted order.
    pub fn encode(&self, value: &str) -> Result<Vec<f64>, AppError> {
        let idx = self
            .categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| {
                AppError::new(
                    3,
                    format!(
                        "Unknown {} '{value}'. Known: {}.",
                        self.feature,
                        self.categories.join(", ")
                    ),
                )
            })?;

        let mut out = vec![0.0; self.categories.len()];
        out[idx] = 1.0;
        Ok(out)
    }
}

fn validate_categories(feature: &str, categories: &[String]) -> Result<(), AppError> {
    if categories.is_empty() {
        return Err(AppError::new(
            2,
            format!("Encoder for {feature} has an empty category list."),
        ));
    }
    for (i, a) in categories.iter().enumerate() {
        if categories[..i].contains(a) {
            return Err(AppError::new(
                2,
                format!("Encoder for {feature} lists category '{a}' more than once."),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender() -> LabelEncoding {
        LabelEncoding::new("gender", vec!["Female".into(), "Male".into()]).unwrap()
    }

    fn geo() -> OneHotEncoding {
        OneHotEncoding::new(
            "geography",
            vec!["France".into(), "Germany".into(), "Spain".into()],
        )
        .unwrap()
    }

    #[test]
    fn label_encode_maps_to_class_index() {
        let enc = gender();
        assert_eq!(enc.encode("Female").unwrap(), 0.0);
        assert_eq!(enc.encode("Male").unwrap(), 1.0);
    }

    #[test]
    fn label_encode_rejects_unknown_value() {
        let err = gender().encode("Other").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Unknown gender 'Other'"));
    }

    #[test]
    fn one_hot_places_single_indicator() {
        let enc = geo();
        assert_eq!(enc.encode("France").unwrap(), vec![1.0, 0.0, 0.0]);
        assert_eq!(enc.encode("Germany").unwrap(), vec![0.0, 1.0, 0.0]);
        assert_eq!(enc.encode("Spain").unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn one_hot_rejects_unknown_value() {
        let err = geo().encode("Italy").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Unknown geography 'Italy'"));
    }

    #[test]
    fn empty_and_duplicate_category_lists_are_load_errors() {
        assert_eq!(
            LabelEncoding::new("gender", vec![]).unwrap_err().exit_code(),
            2
        );
        let dup = OneHotEncoding::new("geography", vec!["France".into(), "France".into()]);
        assert_eq!(dup.unwrap_err().exit_code(), 2);
    }
}
