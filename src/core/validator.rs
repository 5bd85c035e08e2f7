use crate::domain::model::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::utils::error::{Result, ScreenError};
use serde_json::Value;

pub const FEATURES_KEY: &str = "features";

/// Turn a caller payload into a [`FeatureVector`].
///
/// The count is checked before any element, so a wrong-length vector always
/// reports its length. Elements are coerced the way a numeric data frame
/// would: numbers, numeric strings and booleans pass, everything else is
/// rejected. No per-feature domain checks are made.
pub fn validate(raw: &Value) -> Result<FeatureVector> {
    let features = raw
        .as_object()
        .and_then(|obj| obj.get(FEATURES_KEY))
        .ok_or(ScreenError::MissingFeaturesKey)?;

    let items = features.as_array().ok_or(ScreenError::FeaturesNotSequence)?;

    if items.len() != FEATURE_COUNT {
        return Err(ScreenError::FeatureCountMismatch {
            expected: FEATURE_COUNT,
            actual: items.len(),
        });
    }

    let mut values = [0.0; FEATURE_COUNT];
    for (index, item) in items.iter().enumerate() {
        values[index] = coerce(item).ok_or(ScreenError::NonNumericFeature {
            index,
            name: FEATURE_NAMES[index],
        })?;
    }

    Ok(FeatureVector::new(values))
}

fn coerce(item: &Value) -> Option<f64> {
    let value = match item {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_record() {
        let fv = validate(&json!({"features": [65, 0, 2, 155, 269, 0, 1, 148, 0, 0.8, 2, 0, 2]}))
            .unwrap();
        assert_eq!(fv.get("chol"), Some(269.0));
        assert_eq!(fv.get("oldpeak"), Some(0.8));
    }

    #[test]
    fn test_missing_features_key() {
        for payload in [json!({}), json!(null), json!([1, 2, 3]), json!({"feature": []})] {
            assert!(matches!(validate(&payload), Err(ScreenError::MissingFeaturesKey)));
        }
    }

    #[test]
    fn test_count_mismatch_reports_both_counts() {
        for n in [0usize, 5, 12, 14] {
            let payload = json!({ "features": vec![1.0; n] });
            match validate(&payload) {
                Err(ScreenError::FeatureCountMismatch { expected, actual }) => {
                    assert_eq!(expected, 13);
                    assert_eq!(actual, n);
                }
                other => panic!("unexpected result for {} features: {:?}", n, other),
            }
        }
    }

    #[test]
    fn test_count_is_checked_before_elements() {
        let payload = json!({"features": ["a", "b", "c"]});
        assert!(matches!(
            validate(&payload),
            Err(ScreenError::FeatureCountMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn test_features_must_be_a_list() {
        assert!(matches!(
            validate(&json!({"features": "65,0,2"})),
            Err(ScreenError::FeaturesNotSequence)
        ));
    }

    #[test]
    fn test_numeric_coercion() {
        let fv = validate(&json!({"features": ["65", true, 2, 155, 269, false, 1, 148, 0, " 0.8 ", 2, 0, 2]}))
            .unwrap();
        assert_eq!(fv.get("age"), Some(65.0));
        assert_eq!(fv.get("sex"), Some(1.0));
        assert_eq!(fv.get("fbs"), Some(0.0));
        assert_eq!(fv.get("oldpeak"), Some(0.8));
    }

    #[test]
    fn test_non_numeric_element_names_the_feature() {
        let payload = json!({"features": [65, 0, 2, 155, "high", 0, 1, 148, 0, 0.8, 2, 0, 2]});
        match validate(&payload) {
            Err(ScreenError::NonNumericFeature { index, name }) => {
                assert_eq!(index, 4);
                assert_eq!(name, "chol");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let payload = json!({"features": [65, 0, 2, 155, 269, 0, 1, 148, 0, null, 2, 0, 2]});
        assert!(matches!(
            validate(&payload),
            Err(ScreenError::NonNumericFeature { name: "oldpeak", .. })
        ));
    }

    #[test]
    fn test_out_of_domain_codes_are_accepted() {
        let payload = json!({"features": [65, 7, 9, 155, 269, 3, 1, 148, 0, 0.8, 2, 0, 2]});
        assert!(validate(&payload).is_ok());
    }
}
