use serde::Serialize;
use std::collections::BTreeSet;

/// Canonical name of the umbrella module
pub const UMBRELLA_MODULE: &str = "aGrUM";

/// Set of modules to enable, parsed from a `+`-joined string such as
/// `BASE+BN+agrum`.
///
/// Names are upper-cased, except the umbrella module whose alias is matched
/// without regard to case and stored as [`UMBRELLA_MODULE`]. Empty tokens are
/// dropped (`a++b` is `{A, B}`). The set is ordered so every line built from
/// it is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ModuleSet(BTreeSet<String>);

impl ModuleSet {
    pub fn parse(modules: &str) -> Self {
        Self(
            modules
                .split('+')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    if token.eq_ignore_ascii_case(UMBRELLA_MODULE) {
                        UMBRELLA_MODULE.to_string()
                    } else {
                        token.to_uppercase()
                    }
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.0.contains(module)
    }
}
