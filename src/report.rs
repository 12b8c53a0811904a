//! Plain-text renderings of the artifacts a `BayesNet` exposes.

use crate::cpt::Cpt;
use crate::dataset::{DatasetMetadata, Variable};
use crate::mutual_info::MutualInfoTable;
use crate::spanning_tree::SpanningTree;
use crate::structure::NetworkStructure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Digits after the decimal point for probabilities and information.
    pub precision: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions { precision: 6 }
    }
}

pub fn mutual_info_table(table: &MutualInfoTable, options: &ReportOptions) -> String {
    let mut out = String::from("<Conditional Mutual Information Table>\n");
    for row in table.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|value| format!("{:.*}", options.precision, value))
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

pub fn spanning_tree(tree: &SpanningTree) -> String {
    let edges: Vec<String> = tree
        .edges()
        .iter()
        .map(|(from, to)| format!("({}, {})", from, to))
        .collect();
    format!("<Maximal Spanning Tree>\n{{{}}}\n", edges.join(", "))
}

pub fn structure(net: &NetworkStructure, metadata: &DatasetMetadata) -> String {
    let mut out = String::from("<Bayes Net Structure>\n");
    for (idx, feature) in metadata.features.iter().enumerate() {
        out.push_str(feature.name());
        for &parent in net.parents_of(Variable::Feature(idx)) {
            out.push('\t');
            out.push_str(metadata.name_of(parent));
        }
        out.push('\n');
    }
    out
}

pub fn probability_table(cpt: &Cpt, options: &ReportOptions) -> String {
    let mut out = format!("CPT of attribute {}\n", cpt.node());
    for entry in cpt.entries() {
        let conditions: Vec<String> = entry
            .parent_values
            .iter()
            .map(|(parent, value)| format!("{} = {}", parent, value))
            .collect();
        let given = if conditions.is_empty() {
            String::new()
        } else {
            format!(" | {}", conditions.join(", "))
        };
        out.push_str(&format!(
            "Pr({} = {}{}) = {:.*}\n",
            cpt.node(),
            entry.value,
            given,
            options.precision,
            entry.probability
        ));
    }
    out
}

pub fn probability_tables(tables: &[Cpt], options: &ReportOptions) -> String {
    let mut out = String::from("<Conditional Probability Tables>\n");
    for cpt in tables {
        out.push_str(&probability_table(cpt, options));
    }
    out
}
