use super::super::domain::canonical_method_name;
use super::weights::FactorWeights;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED_CATALOG: &str = include_str!("../../../data/method_catalog.csv");
const METHOD_COLUMN: &str = "method";

/// Errors raised while loading the methodology attribute table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read methodology catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid methodology catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("methodology catalog has no 'method' column")]
    MissingMethodColumn,
    #[error("methodology catalog contains no methodologies")]
    Empty,
}

/// Descriptive attributes for one methodology, keyed by factor.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodAttributes {
    pub name: String,
    attributes: BTreeMap<String, String>,
}

impl MethodAttributes {
    pub fn new(name: impl Into<String>, attributes: BTreeMap<String, String>) -> Self {
        Self {
            name: canonical_method_name(&name.into()),
            attributes,
        }
    }

    /// Attribute text for `factor`, or `None` when the cell is missing or blank.
    pub fn attribute(&self, factor: &str) -> Option<&str> {
        self.attributes
            .get(factor)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// Methodologies and factor weights consumed by the fuzzy engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCatalog {
    methods: Vec<MethodAttributes>,
    weights: FactorWeights,
}

impl MethodCatalog {
    pub fn new(methods: Vec<MethodAttributes>, weights: FactorWeights) -> Self {
        Self { methods, weights }
    }

    /// Catalog compiled into the crate covering the eight reference methodologies.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_CATALOG.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading methodology catalog");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a CSV table whose header is `method` followed by factor names.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let method_index = headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(METHOD_COLUMN))
            .ok_or(CatalogError::MissingMethodColumn)?;

        let mut methods: Vec<MethodAttributes> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let raw_name = record.get(method_index).unwrap_or_default();
            if raw_name.is_empty() {
                continue;
            }

            let attributes = headers
                .iter()
                .enumerate()
                .filter(|(index, header)| *index != method_index && !header.is_empty())
                .filter_map(|(index, header)| {
                    record
                        .get(index)
                        .map(|value| (header.to_string(), value.to_string()))
                })
                .collect();

            let entry = MethodAttributes::new(raw_name, attributes);
            if methods.iter().any(|existing| existing.name == entry.name) {
                warn!(method = %entry.name, raw = raw_name, "duplicate methodology ignored");
                continue;
            }
            methods.push(entry);
        }

        if methods.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self::new(methods, FactorWeights::default()))
    }

    pub fn with_weights(mut self, weights: FactorWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn methods(&self) -> &[MethodAttributes] {
        &self.methods
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn method(&self, name: &str) -> Option<&MethodAttributes> {
        let canonical = canonical_method_name(name);
        self.methods.iter().find(|method| method.name == canonical)
    }
}
