//! Tree-augmented naive Bayes over discrete features.
//!
//! Training runs in a fixed order: conditional mutual information between
//! every feature pair, a Chow-Liu maximum spanning tree over that matrix, the
//! per-node parent lists, and one smoothed probability table per node.

pub mod bayes;
pub mod cpt;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod mutual_info;
pub mod report;
pub mod spanning_tree;
pub mod structure;

pub use bayes::{BayesNet, Prediction};
pub use cpt::{Cpt, CptEntry};
pub use dataset::{DatasetMetadata, Feature, Instance, Variable};
pub use error::{BayesError, InstanceError};
pub use loader::Dataset;
pub use mutual_info::MutualInfoTable;
pub use report::ReportOptions;
pub use spanning_tree::SpanningTree;
pub use structure::{Mode, NetworkStructure};
