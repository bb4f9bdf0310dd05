//! Integer-programming layer.
//!
//! Holds the crate's own linear-constraint types and the seam to the
//! external solver engine. Models are built from [`LinearConstraint`]s over
//! binary [`VarId`]s and handed to any [`SolverBackend`]; the bundled
//! [`GoodLpBackend`] runs them through `good_lp`.

mod backend;
mod expr;
mod model;

pub use backend::{GoodLpBackend, SolveOutcome, SolveStatus, SolverBackend};
pub use expr::{Comparison, LinearConstraint, LinearExpr, VarId, VariablePool};
pub use model::IlpModel;
