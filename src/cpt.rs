use crate::dataset::{DatasetMetadata, Instance, Variable};
use crate::error::BayesError;

/// The most parents any node may have: one tree parent plus the class.
pub const MAX_PARENTS: usize = 2;

/// Laplace-smoothed `P(node | parents)` for a node with up to two parents.
///
/// The table is flat with the node's own value varying fastest, then the
/// first parent, then the second. Each cell holds
/// `(count(node, parents) + 1) / (count(parents) + range(node))`; with no
/// parents `count(parents)` is the number of training instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Cpt {
    node: Variable,
    parents: Vec<Variable>,
    /// Range of the node followed by the range of each parent.
    ranges: Vec<usize>,
    table: Vec<f64>,
}

/// One cell of a `Cpt`.
#[derive(Debug, Clone, PartialEq)]
pub struct CptEntry {
    pub value: usize,
    pub parent_values: Vec<(Variable, usize)>,
    pub probability: f64,
}

impl Cpt {
    pub fn build(
        metadata: &DatasetMetadata,
        node: Variable,
        parents: &[Variable],
        instances: &[Instance],
    ) -> Result<Self, BayesError> {
        if parents.len() > MAX_PARENTS {
            return Err(BayesError::TooManyParents {
                node,
                found: parents.len(),
            });
        }

        let ranges: Vec<usize> = std::iter::once(node)
            .chain(parents.iter().copied())
            .map(|v| metadata.range_of(v))
            .collect();
        let range_self = ranges[0];
        let parent_cells: usize = ranges[1..].iter().product();

        let mut cpt = Cpt {
            node,
            parents: parents.to_vec(),
            ranges,
            table: vec![0.0; range_self * parent_cells],
        };

        let mut joint_count = vec![0usize; cpt.table.len()];
        let mut parent_count = vec![0usize; parent_cells];
        for instance in instances {
            let parent_idx = cpt.parent_index(instance);
            parent_count[parent_idx] += 1;
            joint_count[parent_idx * range_self + instance.value(node)] += 1;
        }

        for (cell, probability) in cpt.table.iter_mut().enumerate() {
            let parent_idx = cell / range_self;
            *probability = (joint_count[cell] as f64 + 1.0)
                / (parent_count[parent_idx] as f64 + range_self as f64);
        }

        Ok(cpt)
    }

    pub fn node(&self) -> Variable {
        self.node
    }

    pub fn parents(&self) -> &[Variable] {
        &self.parents
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Looks up `P(node | parents)` at the values found in `instance`.
    pub fn cond_prob(&self, instance: &Instance) -> f64 {
        let cell = self.parent_index(instance) * self.ranges[0] + instance.value(self.node);
        self.table[cell]
    }

    /// All cells in table order.
    pub fn entries(&self) -> impl Iterator<Item = CptEntry> + '_ {
        self.table.iter().enumerate().map(move |(cell, &probability)| {
            let mut rest = cell / self.ranges[0];
            let parent_values = self
                .parents
                .iter()
                .zip(&self.ranges[1..])
                .map(|(&parent, &range)| {
                    let value = rest % range;
                    rest /= range;
                    (parent, value)
                })
                .collect();
            CptEntry {
                value: cell % self.ranges[0],
                parent_values,
                probability,
            }
        })
    }

    fn parent_index(&self, instance: &Instance) -> usize {
        self.parents
            .iter()
            .zip(&self.ranges[1..])
            .rev()
            .fold(0, |acc, (&parent, &range)| acc * range + instance.value(parent))
    }
}
