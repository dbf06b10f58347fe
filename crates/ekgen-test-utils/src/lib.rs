//! Test utilities and mock types for ekgen development.
//!
//! Provides a periodic in-memory field store implementing
//! [`FieldValues`], a Jacobi-style [`run_sweep`] that applies a generated
//! kernel to it, and reusable [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use ekgen_core::coord::shift_cell;
use ekgen_core::{AssignmentCollection, Cell, ExprError, FieldValues};
use ekgen_space::{DomainExtent, IterationRegion};
use indexmap::IndexMap;

/// Mock field storage over a periodic domain.
///
/// Backed by a `HashMap<(name, component), Vec<f64>>` holding interior
/// values only. Every read or write outside the interior is folded onto
/// its periodic image, which is what a completed halo exchange would
/// provide. Unset fields read as `None`.
#[derive(Clone, Debug)]
pub struct MockFieldStore {
    domain: DomainExtent,
    fields: HashMap<(String, usize), Vec<f64>>,
}

impl MockFieldStore {
    pub fn new(domain: DomainExtent) -> Self {
        Self {
            domain,
            fields: HashMap::new(),
        }
    }

    pub fn domain(&self) -> DomainExtent {
        self.domain
    }

    fn index(&self, cell: Cell) -> usize {
        let [lx, ly, _] = self.domain.extent().map(|l| l as usize);
        let [x, y, z] = self.domain.fold_cell(cell).map(|c| c as usize);
        (z * ly + y) * lx + x
    }

    /// Set every interior value of a field component from `f(cell)`.
    pub fn fill_with(&mut self, field: &str, component: usize, f: impl Fn(Cell) -> f64) {
        let data = IterationRegion::interior(self.domain).cells().map(f).collect();
        self.fields.insert((field.to_string(), component), data);
    }

    /// Set every interior value of a field component to `value`.
    pub fn fill(&mut self, field: &str, component: usize, value: f64) {
        self.fill_with(field, component, |_| value);
    }

    /// Write one value; the field is zero-initialised on first write.
    pub fn set(&mut self, field: &str, component: usize, cell: Cell, value: f64) {
        let index = self.index(cell);
        let count = self.domain.cell_count();
        let data = self
            .fields
            .entry((field.to_string(), component))
            .or_insert_with(|| vec![0.0; count]);
        data[index] = value;
    }

    pub fn get(&self, field: &str, component: usize, cell: Cell) -> Option<f64> {
        let data = self.fields.get(&(field.to_string(), component))?;
        data.get(self.index(cell)).copied()
    }

    /// Sum of a field component over the interior.
    pub fn total(&self, field: &str, component: usize) -> f64 {
        self.fields
            .get(&(field.to_string(), component))
            .map(|d| d.iter().sum())
            .unwrap_or(0.0)
    }
}

impl FieldValues for MockFieldStore {
    fn value(&self, field: &str, component: usize, cell: Cell) -> Option<f64> {
        self.get(field, component, cell)
    }
}

/// Apply `kernel` at every cell in `cells`, Jacobi-style: all reads see
/// `store` as it was before the sweep, all writes go to the returned copy.
pub fn run_sweep(
    kernel: &AssignmentCollection,
    store: &MockFieldStore,
    symbols: &IndexMap<String, f64>,
    cells: impl IntoIterator<Item = Cell>,
) -> Result<MockFieldStore, ExprError> {
    let mut out = store.clone();
    for cell in cells {
        for (target, value) in kernel.evaluate_at(store, symbols, cell)? {
            out.set(&target.field, target.component, shift_cell(cell, target.offset), value);
        }
    }
    Ok(out)
}

/// Apply `kernel` over the interior of the store's domain.
pub fn run_interior_sweep(
    kernel: &AssignmentCollection,
    store: &MockFieldStore,
    symbols: &IndexMap<String, f64>,
) -> Result<MockFieldStore, ExprError> {
    let region = IterationRegion::interior(store.domain());
    run_sweep(kernel, store, symbols, region.cells())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fold_periodically() {
        let mut store = MockFieldStore::new(DomainExtent::new([3, 2, 2]).unwrap());
        store.fill_with("c", 0, |[x, y, z]| (x + 10 * y + 100 * z) as f64);
        assert_eq!(store.get("c", 0, [2, 1, 1]), Some(112.0));
        assert_eq!(store.get("c", 0, [-1, 1, 1]), Some(112.0));
        assert_eq!(store.get("c", 0, [3, -1, 2]), Some(10.0));
        assert_eq!(store.get("c", 1, [0, 0, 0]), None);
    }

    #[test]
    fn set_zero_initialises() {
        let mut store = MockFieldStore::new(DomainExtent::cubic(2).unwrap());
        store.set("q", 0, [1, 1, 1], 3.0);
        assert_eq!(store.get("q", 0, [0, 0, 0]), Some(0.0));
        assert_eq!(store.total("q", 0), 3.0);
    }
}
