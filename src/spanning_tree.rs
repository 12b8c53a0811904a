use crate::error::BayesError;
use crate::mutual_info::MutualInfoTable;
use log::debug;

/// Maximum-weight spanning tree over the features, rooted at feature 0.
///
/// Each edge is `(from, to)` where `to` is the feature that entered the tree
/// on that step, so edges are listed in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    edges: Vec<(usize, usize)>,
}

impl SpanningTree {
    /// Grows the tree Prim-style from feature 0.
    ///
    /// Every step scans the in-tree nodes and then the out-of-tree nodes in
    /// ascending order and keeps the first pair with the strictly greatest
    /// weight, so equal weights resolve to the earliest pair scanned.
    pub fn build(table: &MutualInfoTable) -> Result<Self, BayesError> {
        let n = table.num_features();
        if n < 2 {
            return Err(BayesError::TooFewFeatures { found: n });
        }

        let mut in_tree = vec![false; n];
        in_tree[0] = true;
        let mut edges = Vec::with_capacity(n - 1);

        while edges.len() < n - 1 {
            let mut best: Option<(usize, usize, f64)> = None;
            for i in (0..n).filter(|&i| in_tree[i]) {
                for j in (0..n).filter(|&j| !in_tree[j]) {
                    let weight = table.get(i, j);
                    if best.map_or(true, |(_, _, w)| weight > w) {
                        best = Some((i, j, weight));
                    }
                }
            }

            // At least one node is outside the tree while the loop runs.
            let Some((from, to, weight)) = best else {
                break;
            };
            debug!("tree edge ({}, {}) weight {:.6}", from, to, weight);
            in_tree[to] = true;
            edges.push((from, to));
        }

        Ok(SpanningTree { edges })
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The feature `node` was attached to, or `None` for the root.
    pub fn parent_of(&self, node: usize) -> Option<usize> {
        self.edges
            .iter()
            .find(|&&(_, to)| to == node)
            .map(|&(from, _)| from)
    }

    pub fn total_weight(&self, table: &MutualInfoTable) -> f64 {
        self.edges.iter().map(|&(i, j)| table.get(i, j)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutual_info::DIAGONAL;

    fn symmetric(n: usize, weights: &[((usize, usize), f64)]) -> MutualInfoTable {
        let mut rows = vec![vec![0.0; n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = DIAGONAL;
        }
        for &((i, j), w) in weights {
            rows[i][j] = w;
            rows[j][i] = w;
        }
        MutualInfoTable::from_rows(rows)
    }

    #[test]
    fn picks_heaviest_edges() {
        let table = symmetric(
            4,
            &[
                ((0, 1), 0.1),
                ((0, 2), 0.9),
                ((0, 3), 0.2),
                ((1, 2), 0.3),
                ((1, 3), 0.8),
                ((2, 3), 0.4),
            ],
        );
        let tree = SpanningTree::build(&table).unwrap();
        assert_eq!(tree.edges(), &[(0, 2), (2, 3), (3, 1)]);
        assert!((tree.total_weight(&table) - 2.1).abs() < 1e-12);
    }

    #[test]
    fn ties_resolve_to_first_pair_scanned() {
        let table = symmetric(
            4,
            &[
                ((0, 1), 0.2),
                ((0, 2), 0.5),
                ((0, 3), 0.1),
                ((1, 2), 0.5),
                ((1, 3), 0.3),
                ((2, 3), 0.5),
            ],
        );
        let first = SpanningTree::build(&table).unwrap();
        assert_eq!(first.edges(), &[(0, 2), (2, 1), (2, 3)]);

        let flat = symmetric(3, &[((0, 1), 0.5), ((0, 2), 0.5), ((1, 2), 0.5)]);
        let tree = SpanningTree::build(&flat).unwrap();
        assert_eq!(tree.edges(), &[(0, 1), (0, 2)]);

        for _ in 0..5 {
            assert_eq!(SpanningTree::build(&table).unwrap(), first);
        }
    }

    #[test]
    fn every_non_root_feature_enters_once() {
        let n = 6;
        let mut weights = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                weights.push(((i, j), ((i * 7 + j * 3) % 5) as f64 / 10.0));
            }
        }
        let tree = SpanningTree::build(&symmetric(n, &weights)).unwrap();

        assert_eq!(tree.len(), n - 1);
        let mut entered: Vec<usize> = tree.edges().iter().map(|&(_, to)| to).collect();
        entered.sort_unstable();
        assert_eq!(entered, (1..n).collect::<Vec<_>>());
        assert_eq!(tree.parent_of(0), None);
        for &(from, to) in tree.edges() {
            assert_eq!(tree.parent_of(to), Some(from));
        }
    }

    #[test]
    fn negative_weights_still_span() {
        let table = symmetric(3, &[((0, 1), -2.0), ((0, 2), -3.0), ((1, 2), -2.5)]);
        let tree = SpanningTree::build(&table).unwrap();
        assert_eq!(tree.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn single_feature_is_rejected() {
        let table = MutualInfoTable::from_rows(vec![vec![DIAGONAL]]);
        assert_eq!(
            SpanningTree::build(&table),
            Err(BayesError::TooFewFeatures { found: 1 })
        );
    }
}
