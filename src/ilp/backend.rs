//! Solver backends.
//!
//! The external solver consumes an [`IlpModel`] and returns a status plus,
//! when optimal, a 0/1 binding for every variable.

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::{Comparison, IlpModel, LinearExpr};

/// Terminal solver status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A provably optimal assignment was found.
    Optimal,
    /// No assignment satisfies all constraints.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The solver did not reach a verdict.
    NotSolved,
}

impl SolveStatus {
    /// Whether materialization may proceed.
    #[inline]
    pub fn is_optimal(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NotSolved => "Not Solved",
        })
    }
}

/// Result of a solver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Terminal status.
    pub status: SolveStatus,
    /// Variable binding indexed by `VarId`; present only when optimal.
    pub values: Option<Vec<bool>>,
    /// Objective value of the binding; present only when optimal.
    pub objective_value: Option<f64>,
}

impl SolveOutcome {
    /// An optimal outcome with the given binding.
    pub fn optimal(values: Vec<bool>, objective_value: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values: Some(values),
            objective_value: Some(objective_value),
        }
    }

    /// A non-optimal outcome without a binding.
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            values: None,
            objective_value: None,
        }
    }
}

/// External solver engine.
///
/// Implementations block until a verdict is reached.
pub trait SolverBackend {
    /// Solves `model`, minimising its objective.
    fn solve(&self, model: &IlpModel) -> SolveOutcome;
}

/// Backend running `good_lp`'s default engine (pure-Rust `microlp`).
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::from_other_affine(expr.constant);
    for &(var, coef) in &expr.terms {
        out.add_mul(coef, handles[var.0]);
    }
    out
}

impl SolverBackend for GoodLpBackend {
    fn solve(&self, model: &IlpModel) -> SolveOutcome {
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables()
            .names()
            .iter()
            .map(|name| vars.add(variable().binary().name(name.clone())))
            .collect();

        info!(
            model = model.name(),
            variables = handles.len(),
            constraints = model.constraint_count(),
            "invoking good_lp solver"
        );

        let objective = to_expression(model.objective(), &handles);
        let mut problem = vars.minimise(objective).using(default_solver);
        for c in model.constraints() {
            let lhs = to_expression(&c.lhs, &handles);
            let rhs = c.rhs;
            let lp_constraint = match c.cmp {
                Comparison::Eq => constraint!(lhs == rhs),
                Comparison::Le => constraint!(lhs <= rhs),
                Comparison::Ge => constraint!(lhs >= rhs),
            };
            problem.add_constraint(lp_constraint);
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<bool> = handles.iter().map(|&v| solution.value(v) > 0.5).collect();
                let objective_value = model.objective().evaluate(&values);
                debug!(objective = objective_value, "solver returned optimal binding");
                SolveOutcome::optimal(values, objective_value)
            }
            Err(ResolutionError::Infeasible) => {
                SolveOutcome::without_solution(SolveStatus::Infeasible)
            }
            Err(ResolutionError::Unbounded) => {
                SolveOutcome::without_solution(SolveStatus::Unbounded)
            }
            Err(e) => {
                debug!(error = %e, "solver gave no verdict");
                SolveOutcome::without_solution(SolveStatus::NotSolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::{VarId, VariablePool};

    fn pool(n: usize) -> VariablePool {
        let mut pool = VariablePool::new();
        for i in 0..n {
            pool.add(format!("x{i}"));
        }
        pool
    }

    #[test]
    fn test_optimal_binary_assignment() {
        let mut model = IlpModel::new("pick-one", pool(2));
        model
            .add_constraint(LinearExpr::sum([VarId(0), VarId(1)]).eq(1.0))
            .unwrap();
        let mut objective = LinearExpr::sum([VarId(0)]);
        objective.add_term(VarId(1), 3.0);
        model.set_objective(objective).unwrap();

        let outcome = GoodLpBackend::new().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.values, Some(vec![true, false]));
        assert_eq!(outcome.objective_value, Some(1.0));
    }

    #[test]
    fn test_infeasible_model() {
        let mut model = IlpModel::new("contradiction", pool(1));
        model.add_constraint(LinearExpr::sum([VarId(0)]).leq(0.0)).unwrap();
        model.add_constraint(LinearExpr::sum([VarId(0)]).geq(1.0)).unwrap();

        let outcome = GoodLpBackend::new().solve(&model);
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.values.is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::NotSolved.to_string(), "Not Solved");
        assert!(SolveStatus::Optimal.is_optimal());
        assert!(!SolveStatus::Unbounded.is_optimal());
    }
}
