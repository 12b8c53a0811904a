use crate::dataset::{DatasetMetadata, Instance, Variable};
use rayon::prelude::*;

/// Marks the diagonal so it is never picked as an edge.
pub const DIAGONAL: f64 = -1.0;

/// Symmetric matrix of conditional mutual information between feature pairs
/// given the class.
#[derive(Debug, Clone, PartialEq)]
pub struct MutualInfoTable {
    rows: Vec<Vec<f64>>,
}

impl MutualInfoTable {
    pub fn build(metadata: &DatasetMetadata, instances: &[Instance]) -> Self {
        let n = metadata.num_features();

        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        let values: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| conditional_mutual_info(metadata, instances, i, j))
            .collect();

        let mut rows = vec![vec![0.0; n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = DIAGONAL;
        }
        for (&(i, j), &value) in pairs.iter().zip(values.iter()) {
            rows[i][j] = value;
            rows[j][i] = value;
        }

        MutualInfoTable { rows }
    }

    /// Wraps an existing square matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == rows.len()));
        MutualInfoTable { rows }
    }

    pub fn num_features(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// I(Xi; Xj | Y) in bits, from Laplace-smoothed estimates.
pub fn conditional_mutual_info(
    metadata: &DatasetMetadata,
    instances: &[Instance],
    i: usize,
    j: usize,
) -> f64 {
    let (xi, xj) = (Variable::Feature(i), Variable::Feature(j));
    let range_y = metadata.num_classes();
    let range_i = metadata.range_of(xi);
    let range_j = metadata.range_of(xj);

    let mut y_count = vec![0usize; range_y];
    let mut y_xi_count = vec![0usize; range_y * range_i];
    let mut y_xj_count = vec![0usize; range_y * range_j];
    let mut y_xi_xj_count = vec![0usize; range_y * range_i * range_j];

    for instance in instances {
        let y = instance.class();
        let vi = instance.value(xi);
        let vj = instance.value(xj);
        y_count[y] += 1;
        y_xi_count[y * range_i + vi] += 1;
        y_xj_count[y * range_j + vj] += 1;
        y_xi_xj_count[(y * range_i + vi) * range_j + vj] += 1;
    }

    let total = instances.len() as f64;
    let cells = (range_i * range_j * range_y) as f64;
    let mut info = 0.0;
    for y in 0..range_y {
        let n_y = y_count[y] as f64;
        for vi in 0..range_i {
            for vj in 0..range_j {
                let n_joint = y_xi_xj_count[(y * range_i + vi) * range_j + vj] as f64 + 1.0;
                let p_joint = n_joint / (total + cells);
                let p_pair_given_y = n_joint / (n_y + (range_i * range_j) as f64);
                let p_i_given_y =
                    (y_xi_count[y * range_i + vi] as f64 + 1.0) / (n_y + range_i as f64);
                let p_j_given_y =
                    (y_xj_count[y * range_j + vj] as f64 + 1.0) / (n_y + range_j as f64);
                info += p_joint * (p_pair_given_y / (p_i_given_y * p_j_given_y)).log2();
            }
        }
    }
    info
}
