//! Linear expressions and constraints over binary decision variables.

use serde::Serialize;
use std::fmt;

/// Handle to a binary decision variable in a [`VariablePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VarId(pub usize);

/// Allocator of named binary decision variables.
#[derive(Debug, Clone, Default)]
pub struct VariablePool {
    names: Vec<String>,
}

impl VariablePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new variable.
    pub fn add(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.names.len());
        self.names.push(name.into());
        id
    }

    /// Variable name.
    pub fn name(&self, var: VarId) -> Option<&str> {
        self.names.get(var.0).map(String::as_str)
    }

    /// Number of allocated variables.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no variable has been allocated.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in allocation order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Affine expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    /// The zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of variables, each with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Adds `coef·var`.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Adds `coef·other`.
    pub fn add_scaled(&mut self, other: &LinearExpr, coef: f64) {
        self.terms.extend(other.terms.iter().map(|&(v, c)| (v, c * coef)));
        self.constant += other.constant * coef;
    }

    /// Adds a constant.
    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    /// Checks that every term references one of `var_count` variables and
    /// that all numbers are finite.
    ///
    /// # Errors
    /// Returns a description of the first defect found.
    pub fn check_terms(&self, var_count: usize) -> Result<(), String> {
        if !self.constant.is_finite() {
            return Err(format!("non-finite constant {}", self.constant));
        }
        for &(var, coef) in &self.terms {
            if var.0 >= var_count {
                return Err(format!("unknown variable x{} (pool has {var_count})", var.0));
            }
            if !coef.is_finite() {
                return Err(format!("non-finite coefficient on x{}", var.0));
            }
        }
        Ok(())
    }

    /// Whether the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates under a 0/1 assignment indexed by [`VarId`].
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| if values.get(v.0).copied().unwrap_or(false) { c } else { 0.0 })
            .sum::<f64>()
            + self.constant
    }

    /// Builds `lhs == rhs`.
    pub fn eq(self, rhs: f64) -> LinearConstraint {
        LinearConstraint::new(self, Comparison::Eq, rhs)
    }

    /// Builds `lhs <= rhs`.
    pub fn leq(self, rhs: f64) -> LinearConstraint {
        LinearConstraint::new(self, Comparison::Le, rhs)
    }

    /// Builds `lhs >= rhs`.
    pub fn geq(self, rhs: f64) -> LinearConstraint {
        LinearConstraint::new(self, Comparison::Ge, rhs)
    }
}

/// Relational operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Eq => "==",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
        })
    }
}

/// Linear (in)equality `lhs cmp rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub lhs: LinearExpr,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(lhs: LinearExpr, cmp: Comparison, rhs: f64) -> Self {
        Self { lhs, cmp, rhs }
    }

    /// Checks that this is a legal constraint over a pool of `var_count`
    /// variables.
    ///
    /// # Errors
    /// Returns a description of the first defect found: no variable terms,
    /// a reference to an unallocated variable, or a non-finite number.
    pub fn check_well_formed(&self, var_count: usize) -> Result<(), String> {
        if self.lhs.terms.is_empty() {
            return Err("constraint has no variable terms".into());
        }
        if !self.rhs.is_finite() {
            return Err(format!("non-finite bound in {self}"));
        }
        self.lhs.check_terms(var_count)
    }

    /// Whether a 0/1 assignment satisfies this constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        const EPS: f64 = 1e-6;
        let lhs = self.lhs.evaluate(values);
        match self.cmp {
            Comparison::Eq => (lhs - self.rhs).abs() <= EPS,
            Comparison::Le => lhs <= self.rhs + EPS,
            Comparison::Ge => lhs + EPS >= self.rhs,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for &(var, coef) in &self.lhs.terms {
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if (coef - 1.0).abs() < f64::EPSILON {
                write!(f, "x{}", var.0)?;
            } else {
                write!(f, "{coef}*x{}", var.0)?;
            }
        }
        if first {
            f.write_str("0")?;
        }
        if self.lhs.constant != 0.0 {
            write!(f, " + {}", self.lhs.constant)?;
        }
        write!(f, " {} {}", self.cmp, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_allocates_sequentially() {
        let mut pool = VariablePool::new();
        let a = pool.add("x_0_0_0");
        let b = pool.add("x_0_0_1");
        assert_eq!(a, VarId(0));
        assert_eq!(b, VarId(1));
        assert_eq!(pool.name(b), Some("x_0_0_1"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_well_formed() {
        let c = LinearExpr::sum([VarId(0), VarId(1)]).eq(1.0);
        assert!(c.check_well_formed(2).is_ok());
        assert!(c.check_well_formed(1).is_err());

        let empty = LinearExpr::new().leq(1.0);
        assert!(empty.check_well_formed(5).is_err());

        let nan = LinearExpr::sum([VarId(0)]).geq(f64::NAN);
        assert!(nan.check_well_formed(1).is_err());
    }

    #[test]
    fn test_check_terms() {
        let mut expr = LinearExpr::sum([VarId(0)]);
        expr.add_constant(2.0);
        assert!(expr.check_terms(1).is_ok());
        assert!(expr.check_terms(0).is_err());
        assert!(LinearExpr::new().check_terms(0).is_ok());

        expr.add_term(VarId(0), f64::INFINITY);
        assert!(expr.check_terms(1).is_err());
    }

    #[test]
    fn test_satisfaction() {
        let mut lhs = LinearExpr::sum([VarId(0), VarId(1)]);
        lhs.add_term(VarId(2), -1.0);
        let c = lhs.geq(0.0);
        assert!(c.is_satisfied_by(&[true, false, true]));
        assert!(c.is_satisfied_by(&[false, false, false]));
        assert!(!c.is_satisfied_by(&[false, false, true]));
    }

    #[test]
    fn test_add_scaled_and_evaluate() {
        let mut obj = LinearExpr::new();
        let mut unmet = LinearExpr::sum([VarId(0)]);
        unmet.add_scaled(&LinearExpr::sum([VarId(0)]), -2.0);
        unmet.add_constant(1.0);
        obj.add_scaled(&unmet, 5.0);
        // 5 * (1 + x0 - 2 x0) = 5 - 5 x0
        assert!((obj.evaluate(&[true]) - 0.0).abs() < 1e-9);
        assert!((obj.evaluate(&[false]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let mut lhs = LinearExpr::sum([VarId(3)]);
        lhs.add_term(VarId(4), -1.0);
        assert_eq!(lhs.geq(0.0).to_string(), "x3 + -1*x4 >= 0");
    }
}
