use super::{check_classes, check_finite, default_classes, dot, sigmoid};
use crate::domain::model::ScaledFeatureVector;
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use serde::Deserialize;

/// Binary logistic regression (`coef_[0]`, `intercept_[0]`).
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

impl LogisticRegression {
    pub fn check(&self) -> std::result::Result<(), String> {
        check_classes(&self.classes)?;
        check_finite("coef", &self.coef)?;
        check_finite("intercept", &[self.intercept])
    }

    pub fn decision_function(&self, x: &[f64]) -> f64 {
        dot(&self.coef, x) + self.intercept
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_label(&self, x: &ScaledFeatureVector) -> Result<u8> {
        Ok(u8::from(self.decision_function(x.as_slice()) > 0.0))
    }

    fn predict_probability(&self, x: &ScaledFeatureVector) -> Result<f64> {
        Ok(sigmoid(self.decision_function(x.as_slice())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FEATURE_COUNT;

    fn model() -> LogisticRegression {
        let mut coef = vec![0.0; FEATURE_COUNT];
        coef[0] = 2.0;
        coef[7] = -1.0;
        LogisticRegression {
            coef,
            intercept: 0.0,
            classes: vec![0, 1],
        }
    }

    fn point(age: f64, thalach: f64) -> ScaledFeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = age;
        values[7] = thalach;
        ScaledFeatureVector::new(values)
    }

    #[test]
    fn test_decision_boundary_is_exclusive() {
        let m = model();
        // z == 0 stays on the negative side, like the reference implementation
        assert_eq!(m.predict_label(&point(0.5, 1.0)).unwrap(), 0);
        assert_eq!(m.predict_probability(&point(0.5, 1.0)).unwrap(), 0.5);
        assert_eq!(m.predict_label(&point(1.0, 1.0)).unwrap(), 1);
    }

    #[test]
    fn test_probability_follows_sigmoid() {
        let m = model();
        let p = m.predict_probability(&point(1.0, 0.0)).unwrap();
        assert!((p - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-12);
        let q = m.predict_probability(&point(-1.0, 0.0)).unwrap();
        assert!((p + q - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_check_rejects_non_finite_coefficients() {
        let mut m = model();
        m.coef[3] = f64::NAN;
        assert!(m.check().is_err());
    }
}
