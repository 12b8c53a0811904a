use crate::dataset::Variable;
use crate::spanning_tree::SpanningTree;
use std::fmt;
use std::str::FromStr;

/// Whether features may take a tree parent besides the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Naive,
    TreeAugmented,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "naive" => Ok(Mode::Naive),
            "t" | "tan" | "tree" => Ok(Mode::TreeAugmented),
            other => Err(format!("unknown mode '{}', expected n or t", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Naive => write!(f, "naive Bayes"),
            Mode::TreeAugmented => write!(f, "tree-augmented naive Bayes"),
        }
    }
}

/// Parent lists of every node. A feature has at most one feature parent,
/// always followed by the class; the class has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStructure {
    parents: Vec<Vec<Variable>>,
}

impl NetworkStructure {
    pub fn assemble(tree: &SpanningTree, num_features: usize, mode: Mode) -> Self {
        let mut parents = vec![Vec::with_capacity(2); num_features];

        if mode == Mode::TreeAugmented {
            for &(from, to) in tree.edges() {
                parents[to].push(Variable::Feature(from));
            }
        }
        for list in &mut parents {
            list.push(Variable::Class);
        }

        NetworkStructure { parents }
    }

    pub fn num_features(&self) -> usize {
        self.parents.len()
    }

    pub fn parents_of(&self, node: Variable) -> &[Variable] {
        match node {
            Variable::Feature(idx) => self.parents[idx].as_slice(),
            Variable::Class => &[],
        }
    }

    /// Every node with its parents, features first and the class last.
    pub fn nodes(&self) -> impl Iterator<Item = (Variable, &[Variable])> + '_ {
        (0..self.parents.len())
            .map(Variable::Feature)
            .chain(std::iter::once(Variable::Class))
            .map(move |node| (node, self.parents_of(node)))
    }
}
