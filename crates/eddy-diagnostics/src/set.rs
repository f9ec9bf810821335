//! Named collections of diagnostic fields.

use std::sync::Arc;

use eddy_core::{DiagnosticError, Field, Grid, Idx3};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::compute::compute_interior_parallel;
use crate::config::ComputeConfig;

/// Insertion-ordered set of named diagnostics.
///
/// Iteration, [`evaluate`](Self::evaluate) and
/// [`compute_all`](Self::compute_all) all follow insertion order.
#[derive(Clone, Default)]
pub struct DiagnosticSet {
    entries: IndexMap<String, Arc<dyn Field>>,
}

impl DiagnosticSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `field` under `name`.
    ///
    /// # Errors
    ///
    /// [`DiagnosticError::DuplicateName`] if `name` is already taken; the
    /// existing entry is kept.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        field: Arc<dyn Field>,
    ) -> Result<(), DiagnosticError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(DiagnosticError::DuplicateName { name });
        }
        self.entries.insert(name, field);
        Ok(())
    }

    /// Look up a diagnostic by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Field>> {
        self.entries.get(name)
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every diagnostic's value at `idx`, in insertion order.
    pub fn evaluate(&self, idx: Idx3) -> SmallVec<[f64; 8]> {
        self.entries.values().map(|f| f.value(idx)).collect()
    }

    /// Materialize every diagnostic over the interior of `grid`.
    pub fn compute_all(
        &self,
        grid: &dyn Grid,
        config: &ComputeConfig,
    ) -> IndexMap<String, Vec<f64>> {
        self.entries
            .iter()
            .map(|(name, field)| (name.clone(), compute_interior_parallel(&**field, grid, config)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::Loc3;
    use eddy_test_utils::{constant, index_ramp, shared, uniform_grid};

    #[test]
    fn rejects_duplicate_names() {
        let mut set = DiagnosticSet::new();
        set.insert("a", shared(constant(Loc3::CCC, 1.0))).unwrap();
        let err = set.insert("a", shared(constant(Loc3::CCC, 2.0))).unwrap_err();
        assert_eq!(
            err,
            DiagnosticError::DuplicateName {
                name: "a".to_string()
            }
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").unwrap().value(Idx3::new(0, 0, 0)), 1.0);
    }

    #[test]
    fn evaluates_in_insertion_order() {
        let grid = uniform_grid(2);
        let mut set = DiagnosticSet::new();
        set.insert("z", shared(constant(Loc3::CCC, 3.0))).unwrap();
        set.insert("a", shared(index_ramp(&grid, Loc3::CCC, [1.0, 0.0, 0.0], 0.0)))
            .unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["z", "a"]);
        assert_eq!(set.evaluate(Idx3::new(1, 0, 0)).as_slice(), &[3.0, 1.0]);

        let all = set.compute_all(&grid, &ComputeConfig::default());
        assert_eq!(all.keys().collect::<Vec<_>>(), ["z", "a"]);
        assert_eq!(all["z"], vec![3.0; 8]);
        assert_eq!(all["a"], [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    }
}
