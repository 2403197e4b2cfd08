//! Problem catalog
//!
//! The ordered list of grid problems the simulation walks through. Every entry
//! is validated when the catalog is created, so a bad configuration is rejected
//! before the simulation loop ever starts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path as FsPath;
use std::sync::Arc;
use thiserror::Error;

use super::grid::GridModel;
use super::types::Coord;

/// Configuration problems that can never produce a valid run
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no problems")]
    Empty,

    #[error("grid must have at least one row and one column")]
    ZeroSize,

    #[error("{rows}x{cols} grid exceeds the limit of {max} cells")]
    TooLarge { rows: usize, cols: usize, max: usize },

    #[error("cell {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coord: Coord,
        rows: usize,
        cols: usize,
    },

    #[error("start cell {0} is an obstacle")]
    StartIsObstacle(Coord),

    #[error("exit cell {0} is an obstacle")]
    ExitIsObstacle(Coord),

    #[error("problem {index} ({name}): {source}")]
    InvalidProblem {
        index: usize,
        name: String,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// One grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Edge length of the square grid
    pub size: usize,
    pub start: Coord,
    pub exit: Coord,
    #[serde(default)]
    pub obstacles: BTreeSet<Coord>,
}

impl ProblemSpec {
    pub fn new(
        size: usize,
        start: (usize, usize),
        exit: (usize, usize),
        obstacles: &[(usize, usize)],
    ) -> Self {
        Self {
            name: None,
            size,
            start: start.into(),
            exit: exit.into(),
            obstacles: obstacles.iter().copied().map(Coord::from).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the grid size
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}x{}", self.size, self.size))
    }
}

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    problems: Vec<ProblemSpec>,
}

/// A validated entry: the problem plus the pristine grid built from it
#[derive(Debug, Clone)]
struct CatalogEntry {
    spec: ProblemSpec,
    grid: Arc<GridModel>,
}

/// Ordered, read-only list of problems
#[derive(Debug, Clone)]
pub struct ProblemCatalog {
    entries: Vec<CatalogEntry>,
}

impl ProblemCatalog {
    /// Validate every spec and build the catalog
    pub fn new(specs: Vec<ProblemSpec>) -> Result<Self, CatalogError> {
        if specs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let entries = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| match GridModel::build(&spec) {
                Ok(grid) => Ok(CatalogEntry {
                    spec,
                    grid: Arc::new(grid),
                }),
                Err(err) => Err(CatalogError::InvalidProblem {
                    index,
                    name: spec.label(),
                    source: Box::new(err),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// The three reference problems of increasing size
    pub fn builtin() -> Self {
        let entries = builtin_specs()
            .into_iter()
            .filter_map(|spec| {
                let grid = Arc::new(GridModel::build(&spec).ok()?);
                Some(CatalogEntry { spec, grid })
            })
            .collect();
        Self { entries }
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::new(file.problems)
    }

    /// Load a TOML catalog from disk
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the catalog back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let file = CatalogFile {
            problems: self.entries.iter().map(|e| e.spec.clone()).collect(),
        };
        toml::to_string(&file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the final entry
    pub fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn spec(&self, index: usize) -> Option<&ProblemSpec> {
        self.entries.get(index).map(|e| &e.spec)
    }

    /// A private copy of the given problem's grid, free to search
    pub fn grid(&self, index: usize) -> Option<GridModel> {
        self.entries.get(index).map(|e| GridModel::clone(&e.grid))
    }

    /// The pristine grid itself, shared rather than copied
    pub fn shared_grid(&self, index: usize) -> Option<Arc<GridModel>> {
        self.entries.get(index).map(|e| Arc::clone(&e.grid))
    }

    pub fn specs(&self) -> impl Iterator<Item = &ProblemSpec> {
        self.entries.iter().map(|e| &e.spec)
    }
}

impl Default for ProblemCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_specs() -> Vec<ProblemSpec> {
    vec![
        ProblemSpec::new(5, (0, 0), (4, 4), &[(1, 1), (2, 2), (3, 3)]).with_name("diagonal"),
        ProblemSpec::new(6, (0, 5), (5, 0), &[(1, 0), (2, 1), (3, 2), (4, 3)])
            .with_name("barrier"),
        ProblemSpec::new(7, (3, 3), (6, 6), &[(0, 0), (1, 1), (2, 2), (4, 4), (5, 5)])
            .with_name("center"),
    ]
}
