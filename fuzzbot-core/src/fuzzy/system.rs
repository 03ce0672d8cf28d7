//! Inference system and its builder
//!
//! A `FuzzySystem` is immutable once built: variables, terms and rules are
//! resolved and checked up front, and every evaluation works on fixed-size
//! buffers. Build it once at startup and call [`FuzzySystem::infer`] (or go
//! through an [`InferenceSession`]) every tick.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::buffers::{MAX_BREAKPOINTS, MAX_RULES, MAX_TERMS_PER_VARIABLE, MAX_VARIABLES};
use crate::errors::{FuzzyError, FuzzyResult};

use super::defuzz::{breakpoint_budget, AggregatedSet, Defuzzification};
use super::ops::{Accumulation, Conjunction};
use super::rule::{Clause, Rule, RuleDecl};
use super::session::InferenceSession;
use super::variable::FuzzyVariable;

/// Crisp values, one per input or output variable
pub type CrispValues = Vec<f32, MAX_VARIABLES>;

/// Operator and defuzzification choices
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InferenceConfig {
    /// AND between antecedent clauses
    pub conjunction: Conjunction,
    /// Merging of rule activations and clipped sets
    pub accumulation: Accumulation,
    /// Crisp output method
    pub defuzzification: Defuzzification,
    /// Clamp inputs onto their universe before fuzzification
    pub clip_to_bounds: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            conjunction: Conjunction::Min,
            accumulation: Accumulation::Max,
            defuzzification: Defuzzification::Centroid,
            clip_to_bounds: true,
        }
    }
}

/// Mamdani inference system
#[derive(Debug, Clone)]
pub struct FuzzySystem {
    inputs: Vec<FuzzyVariable, MAX_VARIABLES>,
    outputs: Vec<FuzzyVariable, MAX_VARIABLES>,
    rules: Vec<Rule, MAX_RULES>,
    config: InferenceConfig,
}

impl FuzzySystem {
    /// Start building a system
    pub fn builder() -> FuzzySystemBuilder {
        FuzzySystemBuilder::new()
    }

    /// Antecedent variables in declaration order
    pub fn inputs(&self) -> &[FuzzyVariable] {
        &self.inputs
    }

    /// Consequent variables in declaration order
    pub fn outputs(&self) -> &[FuzzyVariable] {
        &self.outputs
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Operator choices
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Position of an input by name
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|var| var.name() == name)
    }

    /// Position of an output by name
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|var| var.name() == name)
    }

    /// Fresh session with empty input slots
    pub fn session(&self) -> InferenceSession<'_> {
        InferenceSession::new(self)
    }

    /// Run the full inference for one set of crisp inputs
    ///
    /// `inputs` is indexed like [`FuzzySystem::inputs`]; the result like
    /// [`FuzzySystem::outputs`].
    pub fn infer(&self, inputs: &[f32]) -> FuzzyResult<CrispValues> {
        let strengths = self.rule_strengths(inputs)?;

        let mut crisp = Vec::new();
        for (index, variable) in self.outputs.iter().enumerate() {
            let activations = self.activations(index, &strengths);
            if activations.iter().all(|&level| level <= 0.0) {
                return Err(FuzzyError::NoActivation { variable: variable.name() });
            }

            let set = AggregatedSet::build(variable, &activations, self.config.accumulation)?;
            let value = set
                .defuzzify(self.config.defuzzification)
                .ok_or(FuzzyError::NoActivation { variable: variable.name() })?;

            crisp
                .push(value)
                .map_err(|_| FuzzyError::CapacityExceeded { what: "outputs" })?;
        }

        Ok(crisp)
    }

    /// Firing strength of every rule
    pub fn rule_strengths(&self, inputs: &[f32]) -> FuzzyResult<Vec<f32, MAX_RULES>> {
        let crisp = self.prepare_inputs(inputs)?;

        let mut strengths = Vec::new();
        for rule in &self.rules {
            let strength = self.config.conjunction.fold(
                rule.antecedent()
                    .iter()
                    .map(|t| self.inputs[t.variable].degree(t.term, crisp[t.variable])),
            );
            // rules and strengths share a capacity
            let _ = strengths.push(strength);
        }

        Ok(strengths)
    }

    /// Accumulated activation of every term of output `output`
    pub fn activations(&self, output: usize, strengths: &[f32]) -> Vec<f32, MAX_TERMS_PER_VARIABLE> {
        let mut levels: Vec<f32, MAX_TERMS_PER_VARIABLE> = Vec::new();
        let term_count = self.outputs.get(output).map_or(0, |var| var.terms().len());
        for _ in 0..term_count {
            let _ = levels.push(0.0);
        }

        for (rule, &strength) in self.rules.iter().zip(strengths) {
            for target in rule.consequent().iter().filter(|t| t.variable == output) {
                let level = &mut levels[target.term];
                *level = self.config.accumulation.apply(*level, strength);
            }
        }

        levels
    }

    /// Reject non-finite values and clip onto the universes
    fn prepare_inputs(&self, inputs: &[f32]) -> FuzzyResult<CrispValues> {
        let mut crisp = Vec::new();
        for (index, variable) in self.inputs.iter().enumerate() {
            let value = *inputs
                .get(index)
                .ok_or(FuzzyError::MissingInput { variable: variable.name() })?;
            if !value.is_finite() {
                return Err(FuzzyError::InvalidInput { variable: variable.name() });
            }
            let value = if self.config.clip_to_bounds {
                variable.universe().clip(value)
            } else {
                value
            };
            let _ = crisp.push(value);
        }
        Ok(crisp)
    }
}

/// Builder for [`FuzzySystem`]
///
/// Errors are held until [`FuzzySystemBuilder::build`] so declarations
/// chain without `?` at every step.
#[derive(Debug, Clone, Default)]
pub struct FuzzySystemBuilder {
    inputs: Vec<FuzzyVariable, MAX_VARIABLES>,
    outputs: Vec<FuzzyVariable, MAX_VARIABLES>,
    rules: Vec<RuleDecl, MAX_RULES>,
    config: InferenceConfig,
    error: Option<FuzzyError>,
}

impl FuzzySystemBuilder {
    /// Empty builder with default operators
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an antecedent
    pub fn input(mut self, variable: FuzzyVariable) -> Self {
        if self.inputs.push(variable).is_err() {
            self.fail(FuzzyError::CapacityExceeded { what: "inputs" });
        }
        self
    }

    /// Declare a consequent
    pub fn output(mut self, variable: FuzzyVariable) -> Self {
        if self.outputs.push(variable).is_err() {
            self.fail(FuzzyError::CapacityExceeded { what: "outputs" });
        }
        self
    }

    /// Add a rule by names
    pub fn rule(mut self, when: &[Clause], then: &[Clause]) -> Self {
        match RuleDecl::new(when, then) {
            Ok(decl) => {
                if self.rules.push(decl).is_err() {
                    self.fail(FuzzyError::CapacityExceeded { what: "rules" });
                }
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// Set operator choices
    pub fn config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve rules and check capacities
    pub fn build(self) -> FuzzyResult<FuzzySystem> {
        if let Some(err) = self.error {
            return Err(err);
        }

        check_unique_names(&self.inputs, &self.outputs)?;

        for variable in &self.outputs {
            let samples = breakpoint_budget(variable);
            if samples > MAX_BREAKPOINTS {
                return Err(FuzzyError::UniverseTooDense {
                    variable: variable.name(),
                    samples,
                    max: MAX_BREAKPOINTS,
                });
            }
        }

        let mut rules = Vec::new();
        for decl in &self.rules {
            let rule = decl.resolve(&self.inputs, &self.outputs)?;
            let _ = rules.push(rule);
        }

        Ok(FuzzySystem {
            inputs: self.inputs,
            outputs: self.outputs,
            rules,
            config: self.config,
        })
    }

    fn fail(&mut self, err: FuzzyError) {
        self.error.get_or_insert(err);
    }
}

fn check_unique_names(inputs: &[FuzzyVariable], outputs: &[FuzzyVariable]) -> FuzzyResult<()> {
    let all: Vec<&'static str, { 2 * MAX_VARIABLES }> = inputs
        .iter()
        .chain(outputs)
        .map(FuzzyVariable::name)
        .collect();

    for (i, &name) in all.iter().enumerate() {
        if all[i + 1..].contains(&name) {
            return Err(FuzzyError::DuplicateName { name });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::{MembershipFn, Universe};

    fn sensor(name: &'static str) -> FuzzyVariable {
        FuzzyVariable::new(name, Universe::from_parts(0.0, 2000.0, 1.0))
            .unwrap()
            .with_term("far", MembershipFn::Trapezoid { a: 0.0, b: 20.0, c: 60.0, d: 80.0 })
            .unwrap()
            .with_term("near", MembershipFn::Trapezoid { a: 80.0, b: 200.0, c: 800.0, d: 1000.0 })
            .unwrap()
    }

    fn go() -> FuzzyVariable {
        FuzzyVariable::new("go", Universe::from_parts(0.0, 1.0, 0.1))
            .unwrap()
            .with_term("stop", MembershipFn::Triangle { a: 0.0, b: 0.0, c: 0.2 })
            .unwrap()
            .with_term("fast", MembershipFn::Trapezoid { a: 0.3, b: 0.7, c: 1.0, d: 1.0 })
            .unwrap()
    }

    fn system() -> FuzzySystem {
        FuzzySystem::builder()
            .input(sensor("left"))
            .input(sensor("right"))
            .output(go())
            .rule(&[("left", "far"), ("right", "far")], &[("go", "fast")])
            .rule(&[("left", "near"), ("right", "near")], &[("go", "stop")])
            .rule(&[("left", "near"), ("right", "far")], &[("go", "stop")])
            .build()
            .unwrap()
    }

    #[test]
    fn rule_strengths_use_min() {
        let system = system();
        let strengths = system.rule_strengths(&[70.0, 40.0]).unwrap();

        // left.far(70) = 0.5, right.far(40) = 1
        assert!((strengths[0] - 0.5).abs() < 1e-6);
        assert_eq!(strengths[1], 0.0);
        assert_eq!(strengths[2], 0.0);
    }

    #[test]
    fn activations_accumulate_with_max() {
        let system = system();
        // left.near(140) = 0.5; right.near(500) = 1, right.far(500) = 0
        let strengths = system.rule_strengths(&[140.0, 500.0]).unwrap();
        let levels = system.activations(0, &strengths);

        assert!((levels[0] - 0.5).abs() < 1e-6);
        assert_eq!(levels[1], 0.0);
    }

    #[test]
    fn infer_open_space() {
        let system = system();
        let crisp = system.infer(&[40.0, 40.0]).unwrap();

        assert_eq!(crisp.len(), 1);
        assert!(crisp[0] > 0.6, "go {}", crisp[0]);
    }

    #[test]
    fn infer_rejects_non_finite() {
        let system = system();
        assert_eq!(
            system.infer(&[f32::NAN, 40.0]),
            Err(FuzzyError::InvalidInput { variable: "left" })
        );
    }

    #[test]
    fn infer_reports_missing_inputs() {
        let system = system();
        assert_eq!(
            system.infer(&[40.0]),
            Err(FuzzyError::MissingInput { variable: "right" })
        );
    }

    #[test]
    fn silent_rule_base_has_no_output() {
        let system = system();
        // 80 is the shared foot of far and near
        assert_eq!(
            system.infer(&[80.0, 40.0]),
            Err(FuzzyError::NoActivation { variable: "go" })
        );
    }

    #[test]
    fn inputs_clip_to_universe() {
        let system = system();
        // -50 clips to 0 where far is 0; 3000 clips to 1999 where near is 0
        assert!(system.infer(&[-50.0, 40.0]).is_err());
        assert!(system.infer(&[3000.0, 3000.0]).is_err());

        let unclipped = FuzzySystem::builder()
            .input(sensor("left"))
            .output(go())
            .rule(&[("left", "far")], &[("go", "fast")])
            .config(InferenceConfig { clip_to_bounds: false, ..InferenceConfig::default() })
            .build()
            .unwrap();
        assert!(unclipped.infer(&[40.0]).is_ok());
    }

    #[test]
    fn builder_reports_first_error() {
        let err = FuzzySystem::builder()
            .input(sensor("left"))
            .output(go())
            .rule(&[("left", "far")], &[("go", "warp")])
            .build()
            .unwrap_err();
        assert_eq!(err, FuzzyError::UnknownTerm { variable: "go", term: "warp" });

        let err = FuzzySystem::builder()
            .input(sensor("left"))
            .input(sensor("left"))
            .output(go())
            .build()
            .unwrap_err();
        assert_eq!(err, FuzzyError::DuplicateName { name: "left" });
    }

    #[test]
    fn builder_rejects_too_many_inputs() {
        let mut builder = FuzzySystem::builder();
        for name in ["a", "b", "c", "d", "e"] {
            builder = builder.input(sensor(name));
        }
        assert_eq!(
            builder.build().unwrap_err(),
            FuzzyError::CapacityExceeded { what: "inputs" }
        );
    }
}
