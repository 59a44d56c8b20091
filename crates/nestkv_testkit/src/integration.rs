//! Differential test harness.
//!
//! Drives a `LayeredStore` and a [`ReferenceStore`] with the same
//! operations and checks that every observation agrees.

use crate::generators::StoreOp;
use crate::model::{apply_to_model, apply_to_store, Observation, ReferenceStore};
use nestkv_core::LayeredStore;

/// A disagreement between the store and the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Index of the offending operation.
    pub step: usize,
    /// The operation.
    pub op: StoreOp,
    /// What the store returned.
    pub store: Observation,
    /// What the model returned.
    pub model: Observation,
}

/// A store paired with its reference model.
#[derive(Debug, Default)]
pub struct DifferentialHarness {
    /// The store under test.
    pub store: LayeredStore,
    /// The oracle.
    pub model: ReferenceStore,
    steps: usize,
}

impl DifferentialHarness {
    /// Creates a harness over empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `op` to both sides and compares the results.
    pub fn apply(&mut self, op: &StoreOp) -> Result<Observation, Divergence> {
        let step = self.steps;
        self.steps += 1;

        let store = apply_to_store(&mut self.store, op);
        let model = apply_to_model(&mut self.model, op);

        if store == model {
            Ok(store)
        } else {
            Err(Divergence {
                step,
                op: op.clone(),
                store,
                model,
            })
        }
    }

    /// Applies every operation, stopping at the first disagreement.
    pub fn run(&mut self, ops: &[StoreOp]) -> Result<(), Divergence> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Checks that both sides agree on every key the model can see, and
    /// on the stack depth.
    pub fn verify_visible_state(&self) -> Result<(), String> {
        if self.store.depth().as_usize() != self.model.depth() {
            return Err(format!(
                "depth mismatch: store {} vs model {}",
                self.store.depth(),
                self.model.depth()
            ));
        }
        for (key, expected) in self.model.visible() {
            let actual = self.store.get(key);
            if actual != Some(expected.as_str()) {
                return Err(format!(
                    "key {key:?}: store {actual:?} vs model {expected:?}"
                ));
            }
        }
        Ok(())
    }
}
