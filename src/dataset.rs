use crate::error::{BayesError, InstanceError};
use std::fmt;

/// A discrete attribute with values coded as `0..range`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    values: Vec<String>,
}

impl Feature {
    /// Creates a feature whose internal code `i` maps to `values[i]`.
    pub fn new<S: Into<String>>(name: S, values: Vec<String>) -> Self {
        Feature {
            name: name.into(),
            values,
        }
    }

    /// Creates a feature whose external values are just the codes themselves.
    pub fn with_range<S: Into<String>>(name: S, range: usize) -> Self {
        Self::new(name, (0..range).map(|v| v.to_string()).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Converts an internal code back to the external value.
    pub fn value_of(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    /// Converts an external value to its internal code.
    pub fn code_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    pub features: Vec<Feature>,
    pub class_variable: Feature,
}

impl DatasetMetadata {
    pub fn new(features: Vec<Feature>, class_variable: Feature) -> Self {
        DatasetMetadata {
            features,
            class_variable,
        }
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    pub fn num_classes(&self) -> usize {
        self.class_variable.range()
    }

    pub fn feature(&self, variable: Variable) -> &Feature {
        match variable {
            Variable::Feature(idx) => &self.features[idx],
            Variable::Class => &self.class_variable,
        }
    }

    pub fn range_of(&self, variable: Variable) -> usize {
        self.feature(variable).range()
    }

    pub fn name_of(&self, variable: Variable) -> &str {
        self.feature(variable).name()
    }

    /// Rejects metadata that no table could be built from.
    pub fn validate(&self) -> Result<(), BayesError> {
        if self.features.is_empty() {
            return Err(BayesError::NoFeatures);
        }
        if let Some(feature) = self.features.iter().find(|f| f.range() == 0) {
            return Err(BayesError::EmptyFeatureRange {
                feature: feature.name().to_string(),
            });
        }
        if self.num_classes() == 0 {
            return Err(BayesError::EmptyClassRange);
        }
        Ok(())
    }

    /// Checks the feature vector of `instance` against the declared ranges.
    pub fn check_features(&self, instance: &Instance) -> Result<(), InstanceError> {
        if instance.features.len() != self.num_features() {
            return Err(InstanceError::FeatureCountMismatch {
                expected: self.num_features(),
                found: instance.features.len(),
            });
        }
        for (feature, &value) in self.features.iter().zip(instance.features.iter()) {
            if !in_range(value, feature.range()) {
                return Err(InstanceError::FeatureValueOutOfRange {
                    feature: feature.name().to_string(),
                    value,
                    range: feature.range(),
                });
            }
        }
        Ok(())
    }

    /// Like `check_features`, but also checks the class label.
    pub fn check_instance(&self, instance: &Instance) -> Result<(), InstanceError> {
        self.check_features(instance)?;
        if !in_range(instance.label, self.num_classes()) {
            return Err(InstanceError::ClassValueOutOfRange {
                value: instance.label,
                range: self.num_classes(),
            });
        }
        Ok(())
    }
}

fn in_range(value: f64, range: usize) -> bool {
    let rounded = value.round();
    rounded.is_finite() && rounded >= 0.0 && rounded < range as f64
}

/// One node of the network: a feature by index, or the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Feature(usize),
    Class,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Feature(idx) => write!(f, "{}", idx),
            Variable::Class => write!(f, "class"),
        }
    }
}

/// A discretized record. Values are stored as floating-point codes and
/// rounded to the nearest integer when read.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub features: Vec<f64>,
    pub label: f64,
}

impl Instance {
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Instance { features, label }
    }

    /// Builds an instance from integer codes.
    pub fn from_codes(features: &[usize], label: usize) -> Self {
        Instance {
            features: features.iter().map(|&v| v as f64).collect(),
            label: label as f64,
        }
    }

    /// The discrete code of `variable` in this instance.
    pub fn value(&self, variable: Variable) -> usize {
        let raw = match variable {
            Variable::Feature(idx) => self.features[idx],
            Variable::Class => self.label,
        };
        raw.round() as usize
    }

    pub fn class(&self) -> usize {
        self.value(Variable::Class)
    }
}
