use super::{check_classes, check_finite, default_classes};
use crate::domain::model::ScaledFeatureVector;
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use serde::Deserialize;

/// Child index marking a leaf.
const TREE_LEAF: i64 = -1;

/// One fitted decision tree in the parallel-array layout of `tree_`.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left. `value[i]` holds the class
/// weights `[w0, w1]` seen at the node.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn n_nodes(&self) -> usize {
        self.children_left.len()
    }

    fn check(&self, n_features: usize) -> std::result::Result<(), String> {
        let n = self.n_nodes();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!("tree arrays disagree on node count ({})", n));
        }
        check_finite("threshold", &self.threshold)?;

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == TREE_LEAF {
                let [w0, w1] = self.value[node];
                if !(w0.is_finite() && w1.is_finite()) || w0 < 0.0 || w1 < 0.0 || w0 + w1 <= 0.0 {
                    return Err(format!("leaf {} has invalid class weights", node));
                }
                continue;
            }
            // children are always numbered after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {} has out-of-range child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `x`.
    pub fn leaf_distribution(&self, x: &[f64]) -> [f64; 2] {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let f = self.feature[node] as usize;
            // trees are fit on float32 inputs, so compare at that precision
            let v = x[f] as f32 as f64;
            node = if v <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [w0, w1] = self.value[node];
        let total = w0 + w1;
        [w0 / total, w1 / total]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn check(&self) -> std::result::Result<(), String> {
        check_classes(&self.classes)?;
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features)
                .map_err(|reason| format!("tree {}: {}", idx, reason))?;
        }
        Ok(())
    }

    /// Mean of the per-tree leaf distributions.
    pub fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let mut acc = [0.0; 2];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_distribution(x);
            acc[0] += p0;
            acc[1] += p1;
        }
        let n = self.trees.len() as f64;
        [acc[0] / n, acc[1] / n]
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_label(&self, x: &ScaledFeatureVector) -> Result<u8> {
        let [p0, p1] = self.predict_proba(x.as_slice());
        // argmax keeps the first class on ties
        Ok(u8::from(p1 > p0))
    }

    fn predict_probability(&self, x: &ScaledFeatureVector) -> Result<f64> {
        Ok(self.predict_proba(x.as_slice())[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FEATURE_COUNT;

    /// Splits on `feature` at `threshold`; left leaf is mostly healthy.
    fn stump(feature: i64, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![[50.0, 50.0], left, right],
        }
    }

    fn forest() -> RandomForest {
        RandomForest {
            classes: vec![0, 1],
            n_features: FEATURE_COUNT,
            trees: vec![
                stump(2, 0.0, [8.0, 2.0], [1.0, 3.0]),
                stump(7, 0.5, [0.0, 4.0], [6.0, 0.0]),
            ],
        }
    }

    fn point(cp: f64, thalach: f64) -> ScaledFeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[2] = cp;
        values[7] = thalach;
        ScaledFeatureVector::new(values)
    }

    #[test]
    fn test_probability_is_mean_of_normalized_leaves() {
        let f = forest();
        // tree 0 -> left (0.2), tree 1 -> left (1.0)
        let p = f.predict_probability(&point(-1.0, 0.0)).unwrap();
        assert!((p - 0.6).abs() < 1e-12);
        assert_eq!(f.predict_label(&point(-1.0, 0.0)).unwrap(), 1);

        // tree 0 -> right (0.75), tree 1 -> right (0.0)
        let p = f.predict_probability(&point(1.0, 1.0)).unwrap();
        assert!((p - 0.375).abs() < 1e-12);
        assert_eq!(f.predict_label(&point(1.0, 1.0)).unwrap(), 0);
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let f = RandomForest {
            classes: vec![0, 1],
            n_features: FEATURE_COUNT,
            trees: vec![stump(2, 0.0, [1.0, 0.0], [0.0, 1.0])],
        };
        assert_eq!(f.predict_probability(&point(0.0, 0.0)).unwrap(), 0.0);
        assert_eq!(f.predict_probability(&point(1e-3, 0.0)).unwrap(), 1.0);
    }

    #[test]
    fn test_tie_resolves_to_first_class() {
        let f = RandomForest {
            classes: vec![0, 1],
            n_features: FEATURE_COUNT,
            trees: vec![stump(2, 0.0, [1.0, 1.0], [1.0, 1.0])],
        };
        assert_eq!(f.predict_label(&point(0.0, 0.0)).unwrap(), 0);
        assert_eq!(f.predict_probability(&point(0.0, 0.0)).unwrap(), 0.5);
    }

    #[test]
    fn test_check_rejects_broken_trees() {
        let mut f = forest();
        f.trees[0].children_left[0] = 0;
        assert!(f.check().unwrap_err().contains("tree 0"));

        let mut f = forest();
        f.trees[1].feature[0] = 13;
        assert!(f.check().is_err());

        let mut f = forest();
        f.trees[1].value.pop();
        assert!(f.check().is_err());

        let mut f = forest();
        f.trees.clear();
        assert!(f.check().is_err());

        assert!(forest().check().is_ok());
    }
}
