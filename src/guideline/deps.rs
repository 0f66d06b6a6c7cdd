//! Module dependency hygiene
//!
//! A declared dependency is redundant when it is already reachable through
//! another declared dependency of the same module: with `BN -> [BASE,
//! GRAPHS]` and `GRAPHS -> [BASE]`, `BN -> BASE` adds nothing.
//!
//! The graph comes from a TOML file:
//!
//! ```toml
//! [modules]
//! BASE = []
//! GRAPHS = ["BASE"]
//! BN = ["BASE", "GRAPHS"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{ActError, ActResult};

/// Declared dependencies of each module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    #[serde(default)]
    pub modules: BTreeMap<String, Vec<String>>,
}

impl ModuleGraph {
    /// Load a graph file. A missing file is an empty graph.
    pub fn load(path: &Path) -> ActResult<Self> {
        if !path.exists() {
            tracing::debug!("No dependency graph at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ActError::InvalidGraph {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn dependencies(&self, module: &str) -> &[String] {
        self.modules.get(module).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `to` can be reached from `from` following declared edges
    pub fn reaches(&self, from: &str, to: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.dependencies(current).iter().map(String::as_str));
        }

        false
    }
}

/// One dependency that could be dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redundancy {
    pub module: String,
    pub dependency: String,
    /// Declared dependency through which it is already reachable
    pub via: String,
}

pub trait DependencyChecker {
    fn redundant_dependencies(&self, graph: &ModuleGraph) -> Vec<Redundancy>;
}

/// Flags dependencies implied by the transitive closure of the others
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitiveChecker;

impl DependencyChecker for TransitiveChecker {
    fn redundant_dependencies(&self, graph: &ModuleGraph) -> Vec<Redundancy> {
        let mut found = Vec::new();

        for (module, deps) in &graph.modules {
            for dependency in deps {
                let via = deps
                    .iter()
                    .filter(|other| *other != dependency)
                    .find(|other| graph.reaches(other, dependency));
                if let Some(via) = via {
                    found.push(Redundancy {
                        module: module.clone(),
                        dependency: dependency.clone(),
                        via: via.clone(),
                    });
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn graph(edges: &[(&str, &[&str])]) -> ModuleGraph {
        ModuleGraph {
            modules: edges
                .iter()
                .map(|(m, deps)| (m.to_string(), deps.iter().map(|d| d.to_string()).collect()))
                .collect(),
        }
    }

    #[test]
    fn test_direct_and_transitive_redundancy() {
        let g = graph(&[
            ("BASE", &[]),
            ("GRAPHS", &["BASE"]),
            ("BN", &["BASE", "GRAPHS"]),
            ("BNLEARNING", &["BN", "BASE"]),
        ]);
        let found = TransitiveChecker.redundant_dependencies(&g);
        assert_eq!(
            found,
            vec![
                Redundancy {
                    module: "BN".to_string(),
                    dependency: "BASE".to_string(),
                    via: "GRAPHS".to_string(),
                },
                Redundancy {
                    module: "BNLEARNING".to_string(),
                    dependency: "BASE".to_string(),
                    via: "BN".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_minimal_graph_is_clean() {
        let g = graph(&[("BASE", &[]), ("GRAPHS", &["BASE"]), ("BN", &["GRAPHS"])]);
        assert!(TransitiveChecker.redundant_dependencies(&g).is_empty());
    }

    #[test]
    fn test_cycles_terminate() {
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        assert!(g.reaches("A", "B"));
        assert!(!g.reaches("A", "C"));
        assert!(TransitiveChecker.redundant_dependencies(&g).is_empty());
    }

    #[test]
    fn test_load_graph_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("act.deps.toml");
        std::fs::write(&path, "[modules]\nBASE = []\nBN = [\"BASE\"]\n").unwrap();

        let g = ModuleGraph::load(&path).unwrap();
        assert_eq!(g.dependencies("BN"), ["BASE".to_string()]);
        assert!(g.dependencies("MISSING").is_empty());

        assert_eq!(ModuleGraph::load(&temp_dir.path().join("none.toml")).unwrap(), ModuleGraph::default());

        std::fs::write(&path, "modules = 3").unwrap();
        assert!(matches!(ModuleGraph::load(&path), Err(ActError::InvalidGraph { .. })));
    }
}
