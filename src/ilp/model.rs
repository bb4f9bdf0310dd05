//! Solver-agnostic integer-programming model.

use super::{LinearConstraint, LinearExpr, VariablePool};

/// A minimisation problem over binary variables.
#[derive(Debug, Clone, Default)]
pub struct IlpModel {
    name: String,
    variables: VariablePool,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl IlpModel {
    /// Creates a model over the variables of `variables`.
    pub fn new(name: impl Into<String>, variables: VariablePool) -> Self {
        Self {
            name: name.into(),
            variables,
            constraints: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a constraint after checking it is well formed.
    ///
    /// # Errors
    /// Returns the defect description; the model is left unchanged.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) -> Result<(), String> {
        constraint.check_well_formed(self.variables.len())?;
        self.constraints.push(constraint);
        Ok(())
    }

    /// Sets the expression to minimise after checking its terms.
    ///
    /// # Errors
    /// Returns the defect description; the previous objective is kept.
    pub fn set_objective(&mut self, objective: LinearExpr) -> Result<(), String> {
        objective.check_terms(self.variables.len())?;
        self.objective = objective;
        Ok(())
    }

    pub fn variables(&self) -> &VariablePool {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Whether a 0/1 assignment satisfies every constraint.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::VarId;

    fn pool(n: usize) -> VariablePool {
        let mut pool = VariablePool::new();
        for i in 0..n {
            pool.add(format!("x{i}"));
        }
        pool
    }

    #[test]
    fn test_add_constraint_rejects_unknown_variable() {
        let mut model = IlpModel::new("m", pool(2));
        assert!(model.add_constraint(LinearExpr::sum([VarId(0)]).eq(1.0)).is_ok());
        assert!(model.add_constraint(LinearExpr::sum([VarId(2)]).eq(1.0)).is_err());
        assert_eq!(model.constraint_count(), 1);
    }

    #[test]
    fn test_set_objective_rejects_foreign_variable() {
        let mut model = IlpModel::new("m", pool(2));
        assert!(model.set_objective(LinearExpr::sum([VarId(1)])).is_ok());
        assert!(model.set_objective(LinearExpr::sum([VarId(5)])).is_err());
        assert_eq!(model.objective().terms, vec![(VarId(1), 1.0)]);
    }

    #[test]
    fn test_is_feasible() {
        let mut model = IlpModel::new("m", pool(2));
        model
            .add_constraint(LinearExpr::sum([VarId(0), VarId(1)]).leq(1.0))
            .unwrap();
        assert!(model.is_feasible(&[true, false]));
        assert!(!model.is_feasible(&[true, true]));
        assert!(!model.is_feasible(&[true]));
    }
}
