//! Rules of the inference system
//!
//! Rules are written with names (`("left", "near")`) and resolved to index
//! pairs when the system is built, so evaluation never compares strings.

use heapless::Vec;

use crate::constants::buffers::{MAX_ANTECEDENTS, MAX_CONSEQUENTS};
use crate::errors::{FuzzyError, FuzzyResult};

use super::variable::FuzzyVariable;

/// `(variable, term)` by name
pub type Clause = (&'static str, &'static str);

/// Resolved reference to a term of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermRef {
    /// Index of the variable in its role list
    pub variable: usize,
    /// Index of the term within the variable
    pub term: usize,
}

/// Rule written with names, before resolution
#[derive(Debug, Clone)]
pub struct RuleDecl {
    /// Antecedent clauses joined by AND
    pub when: Vec<Clause, MAX_ANTECEDENTS>,
    /// Consequent assignments
    pub then: Vec<Clause, MAX_CONSEQUENTS>,
}

impl RuleDecl {
    /// Build from slices
    pub fn new(when: &[Clause], then: &[Clause]) -> FuzzyResult<Self> {
        Ok(Self {
            when: Vec::from_slice(when)
                .map_err(|_| FuzzyError::CapacityExceeded { what: "antecedent clauses" })?,
            then: Vec::from_slice(then)
                .map_err(|_| FuzzyError::CapacityExceeded { what: "consequent clauses" })?,
        })
    }

    /// Resolve names against the declared variables
    pub fn resolve(&self, inputs: &[FuzzyVariable], outputs: &[FuzzyVariable]) -> FuzzyResult<Rule> {
        let mut antecedent = Vec::new();
        for clause in &self.when {
            antecedent
                .push(resolve_clause(clause, inputs)?)
                .map_err(|_| FuzzyError::CapacityExceeded { what: "antecedent clauses" })?;
        }

        let mut consequent = Vec::new();
        for clause in &self.then {
            consequent
                .push(resolve_clause(clause, outputs)?)
                .map_err(|_| FuzzyError::CapacityExceeded { what: "consequent clauses" })?;
        }

        Ok(Rule { antecedent, consequent })
    }
}

fn resolve_clause(clause: &Clause, variables: &[FuzzyVariable]) -> FuzzyResult<TermRef> {
    let (var_name, term_name) = *clause;
    let variable = variables
        .iter()
        .position(|var| var.name() == var_name)
        .ok_or(FuzzyError::UnknownVariable { name: var_name })?;
    let term = variables[variable]
        .term_index(term_name)
        .ok_or(FuzzyError::UnknownTerm {
            variable: var_name,
            term: term_name,
        })?;
    Ok(TermRef { variable, term })
}

/// Resolved rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Vec<TermRef, MAX_ANTECEDENTS>,
    consequent: Vec<TermRef, MAX_CONSEQUENTS>,
}

impl Rule {
    /// Antecedent terms, one per clause
    pub fn antecedent(&self) -> &[TermRef] {
        &self.antecedent
    }

    /// Consequent terms this rule activates
    pub fn consequent(&self) -> &[TermRef] {
        &self.consequent
    }
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

    fn turn() -> FuzzyVariable {
        FuzzyVariable::new("turn", Universe::from_parts(-3.0, 3.0, 0.1))
            .unwrap()
            .with_term("left", MembershipFn::Trapezoid { a: -2.8, b: -2.2, c: -1.8, d: -1.2 })
            .unwrap()
            .with_term("right", MembershipFn::Trapezoid { a: 1.2, b: 1.8, c: 2.2, d: 2.8 })
            .unwrap()
    }

    #[test]
    fn resolves_names_to_indices() {
        let inputs = [sensor("left"), sensor("right")];
        let outputs = [turn()];

        let rule = RuleDecl::new(&[("left", "near"), ("right", "far")], &[("turn", "right")])
            .unwrap()
            .resolve(&inputs, &outputs)
            .unwrap();

        assert_eq!(rule.antecedent(), &[TermRef { variable: 0, term: 1 }, TermRef { variable: 1, term: 0 }]);
        assert_eq!(rule.consequent(), &[TermRef { variable: 0, term: 1 }]);
    }

    #[test]
    fn unknown_names_rejected() {
        let inputs = [sensor("left")];
        let outputs = [turn()];

        let err = RuleDecl::new(&[("middle", "far")], &[("turn", "left")])
            .unwrap()
            .resolve(&inputs, &outputs)
            .unwrap_err();
        assert_eq!(err, FuzzyError::UnknownVariable { name: "middle" });

        let err = RuleDecl::new(&[("left", "touching")], &[("turn", "left")])
            .unwrap()
            .resolve(&inputs, &outputs)
            .unwrap_err();
        assert_eq!(err, FuzzyError::UnknownTerm { variable: "left", term: "touching" });
    }

    #[test]
    fn too_many_clauses_rejected() {
        let when = [("left", "far"); MAX_ANTECEDENTS + 1];
        assert!(RuleDecl::new(&when, &[]).is_err());
    }
}
