use crate::cpt::Cpt;
use crate::dataset::{DatasetMetadata, Instance, Variable};
use crate::error::BayesError;
use crate::mutual_info::MutualInfoTable;
use crate::spanning_tree::SpanningTree;
use crate::structure::{Mode, NetworkStructure};
use log::{debug, info};

/// A trained naive or tree-augmented naive Bayes classifier.
///
/// Training instances are only borrowed while the tables are built; the
/// metadata stays borrowed so predictions can be mapped back to class values.
#[derive(Debug, Clone)]
pub struct BayesNet<'a> {
    metadata: &'a DatasetMetadata,
    mode: Mode,
    mutual_info: MutualInfoTable,
    spanning_tree: SpanningTree,
    structure: NetworkStructure,
    /// One table per feature in index order, then the class prior.
    tables: Vec<Cpt>,
}

/// Outcome of classifying one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<'a> {
    pub class: usize,
    pub label: &'a str,
    pub probability: f64,
    /// Posterior of every class, summing to 1.
    pub posterior: Vec<f64>,
}

impl<'a> BayesNet<'a> {
    pub fn new(
        metadata: &'a DatasetMetadata,
        instances: &[Instance],
        mode: Mode,
    ) -> Result<Self, BayesError> {
        metadata.validate()?;
        for (index, instance) in instances.iter().enumerate() {
            metadata
                .check_instance(instance)
                .map_err(|source| BayesError::TrainingInstance { index, source })?;
        }

        let num_features = metadata.num_features();
        info!(
            "training {} on {} instances with {} features and {} classes",
            mode,
            instances.len(),
            num_features,
            metadata.num_classes()
        );

        let mutual_info = MutualInfoTable::build(metadata, instances);
        info!("built {0}x{0} conditional mutual information table", num_features);

        let spanning_tree = SpanningTree::build(&mutual_info)?;
        info!(
            "built spanning tree with {} edges, total weight {:.6}",
            spanning_tree.len(),
            spanning_tree.total_weight(&mutual_info)
        );

        let structure = NetworkStructure::assemble(&spanning_tree, num_features, mode);

        let tables = structure
            .nodes()
            .map(|(node, parents)| -> Result<Cpt, BayesError> {
                let cpt = Cpt::build(metadata, node, parents, instances)?;
                debug!(
                    "built CPT for {} with {} parents ({} cells)",
                    metadata.name_of(node),
                    parents.len(),
                    cpt.len()
                );
                Ok(cpt)
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!("built {} probability tables", tables.len());

        Ok(BayesNet {
            metadata,
            mode,
            mutual_info,
            spanning_tree,
            structure,
            tables,
        })
    }

    pub fn metadata(&self) -> &'a DatasetMetadata {
        self.metadata
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mutual_info(&self) -> &MutualInfoTable {
        &self.mutual_info
    }

    pub fn spanning_tree(&self) -> &SpanningTree {
        &self.spanning_tree
    }

    pub fn structure(&self) -> &NetworkStructure {
        &self.structure
    }

    pub fn tables(&self) -> &[Cpt] {
        &self.tables
    }

    pub fn table(&self, node: Variable) -> &Cpt {
        match node {
            Variable::Feature(idx) => &self.tables[idx],
            Variable::Class => &self.tables[self.tables.len() - 1],
        }
    }

    /// Classifies `instance`. Its own class label is ignored.
    pub fn predict(&self, instance: &Instance) -> Result<Prediction<'a>, BayesError> {
        self.metadata.check_features(instance)?;

        // Scores are summed in log space; smoothed probabilities are never 0.
        let mut scratch = instance.clone();
        let log_scores: Vec<f64> = (0..self.metadata.num_classes())
            .map(|y| {
                scratch.label = y as f64;
                self.tables
                    .iter()
                    .map(|cpt| cpt.cond_prob(&scratch).ln())
                    .sum::<f64>()
            })
            .collect();

        let max_log = log_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut posterior: Vec<f64> =
            log_scores.iter().map(|s| (s - max_log).exp()).collect();
        let total: f64 = posterior.iter().sum();
        posterior.iter_mut().for_each(|p| *p /= total);

        let (class, probability) = posterior.iter().enumerate().fold(
            (0, f64::NEG_INFINITY),
            |(best_class, best_prob), (class, &prob)| {
                if prob > best_prob {
                    (class, prob)
                } else {
                    (best_class, best_prob)
                }
            },
        );

        let label = self
            .metadata
            .class_variable
            .value_of(class)
            .unwrap_or_default();

        Ok(Prediction {
            class,
            label,
            probability,
            posterior,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Feature;
    use crate::error::InstanceError;

    fn metadata(num_features: usize) -> DatasetMetadata {
        DatasetMetadata::new(
            (0..num_features)
                .map(|i| Feature::with_range(format!("x{}", i), 2))
                .collect(),
            Feature::new("y", vec!["neg".to_string(), "pos".to_string()]),
        )
    }

    fn instances() -> Vec<Instance> {
        vec![
            Instance::from_codes(&[0, 0, 0], 0),
            Instance::from_codes(&[0, 0, 1], 0),
            Instance::from_codes(&[1, 1, 1], 1),
            Instance::from_codes(&[1, 1, 0], 1),
            Instance::from_codes(&[0, 1, 1], 1),
            Instance::from_codes(&[1, 0, 0], 0),
        ]
    }

    #[test]
    fn builds_one_table_per_node() {
        let metadata = metadata(3);
        let net = BayesNet::new(&metadata, &instances(), Mode::TreeAugmented).unwrap();
        assert_eq!(net.tables().len(), 4);
        assert_eq!(net.spanning_tree().len(), 2);
        assert_eq!(net.table(Variable::Class).node(), Variable::Class);
        for idx in 0..3 {
            let node = Variable::Feature(idx);
            assert_eq!(net.table(node).node(), node);
            assert_eq!(net.table(node).parents(), net.structure().parents_of(node));
        }
    }

    #[test]
    fn posterior_sums_to_one() {
        let metadata = metadata(3);
        for mode in [Mode::Naive, Mode::TreeAugmented] {
            let net = BayesNet::new(&metadata, &instances(), mode).unwrap();
            for a in 0..2 {
                for b in 0..2 {
                    for c in 0..2 {
                        let instance = Instance::from_codes(&[a, b, c], 0);
                        let prediction = net.predict(&instance).unwrap();
                        let total: f64 = prediction.posterior.iter().sum();
                        assert!((total - 1.0).abs() < 1e-12);
                        assert_eq!(
                            prediction.probability,
                            prediction.posterior[prediction.class]
                        );
                        assert!(prediction.probability >= 0.5);
                    }
                }
            }
        }
    }

    #[test]
    fn prediction_ignores_instance_label() {
        let metadata = metadata(3);
        let net = BayesNet::new(&metadata, &instances(), Mode::TreeAugmented).unwrap();
        let a = net.predict(&Instance::from_codes(&[1, 1, 1], 0)).unwrap();
        let b = net.predict(&Instance::from_codes(&[1, 1, 1], 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.label, "pos");
    }

    #[test]
    fn naive_mode_ignores_tree_parents() {
        let metadata = metadata(3);
        let net = BayesNet::new(&metadata, &instances(), Mode::Naive).unwrap();
        for table in &net.tables()[..3] {
            assert_eq!(table.parents(), &[Variable::Class]);
        }
        // The tree is still available for diagnostics.
        assert_eq!(net.spanning_tree().len(), 2);
    }

    #[test]
    fn symmetric_evidence_ties_to_first_class() {
        let metadata = metadata(2);
        let net = BayesNet::new(&metadata, &[], Mode::TreeAugmented).unwrap();
        let prediction = net.predict(&Instance::from_codes(&[1, 0], 0)).unwrap();
        assert_eq!(prediction.class, 0);
        assert!((prediction.probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn posterior_stays_normalized_with_many_features() {
        // A raw product of 401 probabilities around 0.1 underflows to zero.
        let metadata = DatasetMetadata::new(
            (0..400)
                .map(|i| Feature::with_range(format!("x{}", i), 10))
                .collect(),
            Feature::with_range("y", 2),
        );
        let instances: Vec<Instance> = (0..20usize)
            .map(|k| {
                let codes: Vec<usize> = (0..400usize)
                    .map(|i| (k * 7 + i * 3 + k * i) % 10)
                    .collect();
                Instance::from_codes(&codes, k % 2)
            })
            .collect();

        for mode in [Mode::Naive, Mode::TreeAugmented] {
            let net = BayesNet::new(&metadata, &instances, mode).unwrap();
            for instance in &instances[..4] {
                let prediction = net.predict(instance).unwrap();
                assert!(prediction.posterior.iter().all(|p| p.is_finite()));
                let total: f64 = prediction.posterior.iter().sum();
                assert!((total - 1.0).abs() < 1e-9, "posterior sums to {}", total);
                assert!(prediction.probability > 0.0 && prediction.probability <= 1.0);
                assert_eq!(
                    prediction.probability,
                    prediction.posterior[prediction.class]
                );
            }
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        let one_feature = metadata(1);
        assert_eq!(
            BayesNet::new(&one_feature, &[], Mode::Naive).unwrap_err(),
            BayesError::TooFewFeatures { found: 1 }
        );

        let metadata = metadata(3);
        let mut bad = instances();
        bad[4] = Instance::from_codes(&[0, 2, 1], 1);
        assert!(matches!(
            BayesNet::new(&metadata, &bad, Mode::TreeAugmented),
            Err(BayesError::TrainingInstance {
                index: 4,
                source: InstanceError::FeatureValueOutOfRange { .. }
            })
        ));

        let net = BayesNet::new(&metadata, &instances(), Mode::TreeAugmented).unwrap();
        assert_eq!(
            net.predict(&Instance::from_codes(&[0, 1], 0)),
            Err(BayesError::Instance(InstanceError::FeatureCountMismatch {
                expected: 3,
                found: 2
            }))
        );
    }
}
