use crate::dataset::{DatasetMetadata, Feature, Instance};
use anyhow::{bail, ensure, Context, Result};
use csv::StringRecord;
use std::{
    collections::{hash_map::Entry, HashMap},
    path::Path,
};

/// A training set and a test set that share one set of metadata.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub metadata: DatasetMetadata,
    pub train: Vec<Instance>,
    pub test: Vec<Instance>,
}

/// Value dictionary for one column, in order of first appearance.
#[derive(Default)]
struct Dictionary {
    values: Vec<String>,
    codes: HashMap<String, usize>,
}

impl Dictionary {
    fn code(&mut self, value: &str) -> usize {
        match self.codes.entry(value.to_string()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.values.push(value.to_string());
                *entry.insert(self.values.len() - 1)
            }
        }
    }
}

impl Dataset {
    /// Loads two CSV files with identical headers. Every column is nominal and
    /// the last one is the class.
    pub fn load<P: AsRef<Path>>(train_path: P, test_path: P) -> Result<Self> {
        let (train_path, test_path) = (train_path.as_ref(), test_path.as_ref());
        let (header, train_rows) = Self::read(train_path)?;
        let (test_header, test_rows) = Self::read(test_path)?;

        ensure!(
            header == test_header,
            "{} and {} have different headers.",
            train_path.display(),
            test_path.display()
        );
        ensure!(
            header.len() >= 3,
            "{} needs at least two feature columns and a class column.",
            train_path.display()
        );

        let mut dictionaries: Vec<Dictionary> =
            header.iter().map(|_| Dictionary::default()).collect();
        let train = Self::encode(&mut dictionaries, &train_rows);
        let test = Self::encode(&mut dictionaries, &test_rows);

        let mut features: Vec<Feature> = header
            .iter()
            .zip(dictionaries)
            .map(|(name, dictionary)| Feature::new(name, dictionary.values))
            .collect();
        // The header has at least 3 columns.
        let class_variable = features.pop().context("missing class column.")?;

        Ok(Dataset {
            metadata: DatasetMetadata::new(features, class_variable),
            train,
            test,
        })
    }

    fn read(path: &Path) -> Result<(StringRecord, Vec<StringRecord>)> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("failed to open {}.", path.display()))?;

        let header = reader.headers()?.clone();
        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("{}: bad record {}.", path.display(), i + 1))?;
            if let Some(column) = record.iter().position(str::is_empty) {
                bail!(
                    "{}: record {} is missing a value for '{}'.",
                    path.display(),
                    i + 1,
                    header.get(column).unwrap_or_default()
                );
            }
            rows.push(record);
        }

        Ok((header, rows))
    }

    fn encode(dictionaries: &mut [Dictionary], rows: &[StringRecord]) -> Vec<Instance> {
        rows.iter()
            .map(|record| {
                let mut codes: Vec<f64> = record
                    .iter()
                    .zip(dictionaries.iter_mut())
                    .map(|(value, dictionary)| dictionary.code(value) as f64)
                    .collect();
                // Headers and records are the same width.
                let label = codes.pop().unwrap_or_default();
                Instance::new(codes, label)
            })
            .collect()
    }

    /// The external class value of `instance`.
    pub fn class_value<'a>(&'a self, instance: &Instance) -> &'a str {
        self.metadata
            .class_variable
            .value_of(instance.class())
            .unwrap_or_default()
    }
}
