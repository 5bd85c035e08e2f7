//! Inversion policy: classifiers speak "1 = disease", callers hear "1 = healthy".

use crate::domain::model::{ModelVerdict, Outlook, PredictionResult, RawVerdict};

/// `round((1 - p) * 100, 2)`, the percent chance of being healthy.
pub fn healthy_percent(disease_probability: f64) -> f64 {
    let percent = (1.0 - disease_probability) * 100.0;
    ((percent * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// Flip one raw verdict into the external convention.
pub fn invert(raw: RawVerdict) -> ModelVerdict {
    let outlook = if raw.label == 1 {
        Outlook::Disease
    } else {
        Outlook::Healthy
    };
    ModelVerdict {
        outlook,
        healthy_percent: healthy_percent(raw.disease_probability),
    }
}

pub fn aggregate(logistic: RawVerdict, random_forest: RawVerdict, svm: RawVerdict) -> PredictionResult {
    PredictionResult {
        logistic: invert(logistic),
        random_forest: invert(random_forest),
        svm: invert(svm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(label: u8, p: f64) -> RawVerdict {
        RawVerdict {
            label,
            disease_probability: p,
        }
    }

    #[test]
    fn test_boundary_probabilities() {
        assert_eq!(healthy_percent(0.0), 100.0);
        assert_eq!(healthy_percent(1.0), 0.0);
        assert_eq!(healthy_percent(0.5), 50.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(healthy_percent(0.123456), 87.65);
        assert_eq!(healthy_percent(0.98761), 1.24);
        assert_eq!(healthy_percent(1.0 / 3.0), 66.67);
    }

    #[test]
    fn test_label_is_flipped() {
        assert_eq!(invert(raw(1, 0.9)).outlook.code(), 0);
        assert_eq!(invert(raw(0, 0.1)).outlook.code(), 1);
    }

    #[test]
    fn test_percent_stays_in_range() {
        for i in 0..=1000 {
            let p = i as f64 / 1000.0;
            let v = healthy_percent(p);
            assert!((0.0..=100.0).contains(&v), "p = {} gave {}", p, v);
        }
    }

    #[test]
    fn test_aggregate_applies_policy_to_every_model() {
        let result = aggregate(raw(1, 0.8), raw(0, 0.3), raw(1, 0.5));
        let response = result.to_response();
        assert_eq!((response.lr_pred, response.rf_pred, response.svm_pred), (0, 1, 0));
        assert_eq!(response.lr_prob, 20.0);
        assert_eq!(response.rf_prob, 70.0);
        assert_eq!(response.svm_prob, 50.0);
    }
}
