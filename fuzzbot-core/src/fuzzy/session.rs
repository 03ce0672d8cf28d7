//! Per-tick inference session
//!
//! Holds the input slots and, after [`InferenceSession::compute`], the crisp
//! outputs. Sessions borrow the system, are cheap to create and carry
//! nothing from one tick to the next.

use heapless::Vec;

use crate::constants::buffers::MAX_VARIABLES;
use crate::errors::{FuzzyError, FuzzyResult};

use super::system::{CrispValues, FuzzySystem};

/// Transient input/output slots over a [`FuzzySystem`]
#[derive(Debug)]
pub struct InferenceSession<'a> {
    system: &'a FuzzySystem,
    inputs: Vec<Option<f32>, MAX_VARIABLES>,
    outputs: Option<CrispValues>,
}

impl<'a> InferenceSession<'a> {
    pub(crate) fn new(system: &'a FuzzySystem) -> Self {
        let mut inputs = Vec::new();
        for _ in system.inputs() {
            let _ = inputs.push(None);
        }
        Self {
            system,
            inputs,
            outputs: None,
        }
    }

    /// Set an input by variable name
    ///
    /// Clears any previous outputs.
    pub fn set_input(&mut self, name: &'static str, value: f32) -> FuzzyResult<()> {
        let index = self
            .system
            .input_index(name)
            .ok_or(FuzzyError::UnknownVariable { name })?;
        self.inputs[index] = Some(value);
        self.outputs = None;
        Ok(())
    }

    /// Run inference on the current inputs
    pub fn compute(&mut self) -> FuzzyResult<()> {
        let mut crisp: Vec<f32, MAX_VARIABLES> = Vec::new();
        for (slot, variable) in self.inputs.iter().zip(self.system.inputs()) {
            let value = slot.ok_or(FuzzyError::MissingInput { variable: variable.name() })?;
            let _ = crisp.push(value);
        }

        self.outputs = Some(self.system.infer(&crisp)?);
        Ok(())
    }

    /// Crisp output by variable name, once computed
    pub fn output(&self, name: &str) -> Option<f32> {
        let index = self.system.output_index(name)?;
        self.outputs.as_ref().and_then(|values| values.get(index).copied())
    }

    /// All crisp outputs, once computed
    pub fn outputs(&self) -> Option<&[f32]> {
        self.outputs.as_deref()
    }
}
