use crate::dataset::Variable;
use thiserror::Error;

/// Problems with a single instance that make it inconsistent with the metadata.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    #[error("expected {expected} feature values, got {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    #[error("value {value} of feature '{feature}' is outside its range [0, {range})")]
    FeatureValueOutOfRange {
        feature: String,
        value: f64,
        range: usize,
    },

    #[error("class value {value} is outside its range [0, {range})")]
    ClassValueOutOfRange { value: f64, range: usize },
}

/// Errors raised while training or querying a `BayesNet`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BayesError {
    #[error("dataset has no features")]
    NoFeatures,

    #[error("a tree-augmented network needs at least 2 features, found {found}")]
    TooFewFeatures { found: usize },

    #[error("feature '{feature}' has an empty value range")]
    EmptyFeatureRange { feature: String },

    #[error("class variable has an empty value range")]
    EmptyClassRange,

    #[error("node {node} has {found} parents, at most 2 are allowed")]
    TooManyParents { node: Variable, found: usize },

    #[error("training instance {index} is invalid: {source}")]
    TrainingInstance {
        index: usize,
        #[source]
        source: InstanceError,
    },

    #[error(transparent)]
    Instance(#[from] InstanceError),
}
