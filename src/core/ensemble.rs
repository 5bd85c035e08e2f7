use crate::domain::model::{ModelName, RawVerdict, ScaledFeatureVector};
use crate::domain::ports::Classifier;
use crate::utils::error::{Result, ScreenError};

/// The three fitted classifiers, queried independently for every record.
#[derive(Debug)]
pub struct Ensemble {
    pub logistic: Box<dyn Classifier>,
    pub random_forest: Box<dyn Classifier>,
    pub svm: Box<dyn Classifier>,
}

/// Raw verdicts in [`ModelName::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVerdicts {
    pub logistic: RawVerdict,
    pub random_forest: RawVerdict,
    pub svm: RawVerdict,
}

impl Ensemble {
    pub fn model(&self, name: ModelName) -> &dyn Classifier {
        match name {
            ModelName::Logistic => self.logistic.as_ref(),
            ModelName::RandomForest => self.random_forest.as_ref(),
            ModelName::Svm => self.svm.as_ref(),
        }
    }

    /// Query every model. Any failure fails the whole record; there is no
    /// partial result.
    pub fn predict_all(&self, x: &ScaledFeatureVector) -> Result<RawVerdicts> {
        Ok(RawVerdicts {
            logistic: predict_one(ModelName::Logistic, self.logistic.as_ref(), x)?,
            random_forest: predict_one(ModelName::RandomForest, self.random_forest.as_ref(), x)?,
            svm: predict_one(ModelName::Svm, self.svm.as_ref(), x)?,
        })
    }
}

fn predict_one(name: ModelName, model: &dyn Classifier, x: &ScaledFeatureVector) -> Result<RawVerdict> {
    let label = model.predict_label(x)?;
    if label > 1 {
        return Err(ScreenError::InferenceError {
            model: name.to_string(),
            message: format!("label {} is not binary", label),
        });
    }

    let disease_probability = model.predict_probability(x)?;
    if !(0.0..=1.0).contains(&disease_probability) {
        return Err(ScreenError::InferenceError {
            model: name.to_string(),
            message: format!("probability {} outside [0, 1]", disease_probability),
        });
    }

    tracing::debug!(model = %name, label, disease_probability, "model verdict");
    Ok(RawVerdict {
        label,
        disease_probability,
    })
}
