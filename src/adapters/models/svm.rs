use super::{check_classes, check_finite, default_classes, dot, sigmoid};
use crate::domain::model::ScaledFeatureVector;
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: i32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    fn eval(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * sq).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(*degree),
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }

    fn check(&self) -> std::result::Result<(), String> {
        match self {
            Kernel::Linear => Ok(()),
            Kernel::Rbf { gamma } => check_finite("kernel.gamma", &[*gamma]),
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => {
                if *degree < 0 {
                    return Err(format!("kernel.degree {} is negative", degree));
                }
                check_finite("kernel", &[*gamma, *coef0])
            }
            Kernel::Sigmoid { gamma, coef0 } => check_finite("kernel", &[*gamma, *coef0]),
        }
    }
}

/// Binary support vector classifier fit with Platt scaling.
///
/// `f(x) = sum_i dual_coef[i] * K(sv_i, x) + intercept`, positive side is the
/// second class. Platt scaling was fit on `-f` (libsvm's own orientation), so
/// the probability of the second class is `1 / (1 + exp(prob_a * f - prob_b))`
/// and a fitted `prob_a` is negative.
/// Label and probability are computed independently and can disagree close to
/// the margin.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportVectorClassifier {
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    pub prob_a: f64,
    pub prob_b: f64,
}

impl SupportVectorClassifier {
    pub fn check(&self) -> std::result::Result<(), String> {
        check_classes(&self.classes)?;
        self.kernel.check()?;

        let Some(first) = self.support_vectors.first() else {
            return Err("no support vectors".to_string());
        };
        if self.dual_coef.len() != self.support_vectors.len() {
            return Err(format!(
                "{} dual coefficients for {} support vectors",
                self.dual_coef.len(),
                self.support_vectors.len()
            ));
        }
        for (idx, sv) in self.support_vectors.iter().enumerate() {
            if sv.len() != first.len() {
                return Err(format!("support vector {} has {} features", idx, sv.len()));
            }
            check_finite("support_vectors", sv)?;
        }
        check_finite("dual_coef", &self.dual_coef)?;
        check_finite("intercept/prob_a/prob_b", &[self.intercept, self.prob_a, self.prob_b])
    }

    pub fn decision_function(&self, x: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, alpha)| alpha * self.kernel.eval(sv, x))
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for SupportVectorClassifier {
    fn n_features(&self) -> usize {
        self.support_vectors.first().map(Vec::len).unwrap_or(0)
    }

    fn predict_label(&self, x: &ScaledFeatureVector) -> Result<u8> {
        Ok(u8::from(self.decision_function(x.as_slice()) > 0.0))
    }

    fn predict_probability(&self, x: &ScaledFeatureVector) -> Result<f64> {
        let f = self.decision_function(x.as_slice());
        Ok(sigmoid(self.prob_b - self.prob_a * f))
    }
}
