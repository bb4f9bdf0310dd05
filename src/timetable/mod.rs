//! Model assembly and solve orchestration.
//!
//! A [`Timetable`] drives one single-shot run through
//! `Unbuilt → ConstraintsAdded → Solved → Materialized`. No transition is
//! reversible; calling an operation out of order yields
//! [`TimetableError::InvalidState`].
//!
//! # Example
//!
//! ```
//! use timetable_ilp::{
//!     CourseType, GoodLpBackend, ProblemInput, SolveStatus, StudentInput, TeacherInput,
//!     Timetable, TimetableConfig,
//! };
//!
//! let input = ProblemInput::new(1)
//!     .with_course("C0", CourseType::Core)
//!     .with_student(StudentInput::new(["C0"]))
//!     .with_teacher(TeacherInput::new(["C0"]));
//!
//! let mut timetable = Timetable::from_input(&input, TimetableConfig::default()).unwrap();
//! let report = timetable.run(&GoodLpBackend::new()).unwrap();
//! assert_eq!(report.status, SolveStatus::Optimal);
//! assert_eq!(report.sections.len(), 1);
//! ```

mod materialize;

pub use materialize::materialize_sections;

use std::fmt;
use tracing::{debug, info, warn};

use crate::config::TimetableConfig;
use crate::constraints::coverage_constraints;
use crate::error::{ConstraintOwner, Result, TimetableError};
use crate::ilp::{IlpModel, LinearConstraint, SolveOutcome, SolveStatus, SolverBackend};
use crate::models::{Participant, Section, TagAllocator};
use crate::objective::build_objective;
use crate::problem::{Problem, ProblemInput};
use crate::report::{SectionView, TimetableKpi, TimetableReport};
use crate::validation::validate_input;

/// Lifecycle phase of a timetable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPhase {
    /// Variables and objective exist; no constraints yet.
    Unbuilt,
    /// All individual and cross-individual constraints added.
    ConstraintsAdded,
    /// The solver returned a terminal status.
    Solved(SolveStatus),
    /// Sections were built from an optimal binding.
    Materialized,
}

impl ModelPhase {
    fn name(self) -> &'static str {
        match self {
            ModelPhase::Unbuilt => "unbuilt",
            ModelPhase::ConstraintsAdded => "constrained",
            ModelPhase::Solved(SolveStatus::Optimal) => "solved",
            ModelPhase::Solved(_) => "unsolvable",
            ModelPhase::Materialized => "materialized",
        }
    }
}

impl fmt::Display for ModelPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A timetable run over one problem.
#[derive(Debug)]
pub struct Timetable {
    problem: Problem,
    config: TimetableConfig,
    model: IlpModel,
    phase: ModelPhase,
    outcome: Option<SolveOutcome>,
    sections: Vec<Section>,
}

impl Timetable {
    /// Creates an unbuilt model over `problem` with the configured objective.
    ///
    /// # Errors
    /// `IllegalConstraint` if the objective references a variable outside
    /// the problem's pool or carries a non-finite weight.
    pub fn new(problem: Problem, config: TimetableConfig) -> Result<Self> {
        let mut model = IlpModel::new("timetable", problem.pool.clone());
        let objective = build_objective(&problem.students, &problem.teachers, &config.objective);
        model
            .set_objective(objective)
            .map_err(|reason| TimetableError::IllegalConstraint {
                owner: ConstraintOwner::Global,
                reason,
            })?;
        Ok(Self {
            problem,
            config,
            model,
            phase: ModelPhase::Unbuilt,
            outcome: None,
            sections: Vec::new(),
        })
    }

    /// Builds the problem from raw input, validating it first when
    /// configured. Tags start from zero for every run.
    ///
    /// # Errors
    /// `Validation` if the input fails integrity checks.
    pub fn from_input(input: &ProblemInput, config: TimetableConfig) -> Result<Self> {
        if config.validate_input {
            validate_input(input).map_err(TimetableError::Validation)?;
        }
        let mut tags = TagAllocator::new();
        let problem = Problem::from_input(input, &mut tags)?;
        Self::new(problem, config)
    }

    fn invalid(&self, operation: &'static str) -> TimetableError {
        TimetableError::InvalidState {
            phase: self.phase.name(),
            operation,
        }
    }

    fn add_all(
        model: &mut IlpModel,
        owner: ConstraintOwner,
        constraints: impl IntoIterator<Item = LinearConstraint>,
    ) -> Result<usize> {
        let mut added = 0;
        for c in constraints {
            model
                .add_constraint(c)
                .map_err(|reason| TimetableError::IllegalConstraint { owner, reason })?;
            added += 1;
        }
        Ok(added)
    }

    /// Adds every individual's constraints, then the coverage constraints.
    ///
    /// # Errors
    /// - `InvalidState` unless the model is unbuilt
    /// - `IllegalConstraint` if any generated constraint is malformed
    pub fn add_constraints(&mut self) -> Result<()> {
        if self.phase != ModelPhase::Unbuilt {
            return Err(self.invalid("add constraints"));
        }

        for s in &self.problem.students {
            let owner = ConstraintOwner::Student(s.tag());
            let n = Self::add_all(&mut self.model, owner, s.constraints())?;
            debug!(student = %s.tag(), constraints = n, "student constraints added");
        }
        for t in &self.problem.teachers {
            let owner = ConstraintOwner::Teacher(t.tag());
            let n = Self::add_all(&mut self.model, owner, t.constraints())?;
            debug!(teacher = %t.tag(), constraints = n, "teacher constraints added");
        }
        let coverage = coverage_constraints(
            &self.problem.students,
            &self.problem.teachers,
            &self.problem.catalog,
            self.config.coverage.exempt_off_courses,
        );
        let n = Self::add_all(&mut self.model, ConstraintOwner::Global, coverage)?;
        debug!(constraints = n, "coverage constraints added");

        info!(
            variables = self.model.variable_count(),
            constraints = self.model.constraint_count(),
            "model assembled"
        );
        self.phase = ModelPhase::ConstraintsAdded;
        Ok(())
    }

    /// Invokes the solver and binds every schedule on an optimal verdict.
    ///
    /// # Errors
    /// `InvalidState` unless constraints were added.
    pub fn solve<B: SolverBackend>(&mut self, backend: &B) -> Result<SolveStatus> {
        if self.phase != ModelPhase::ConstraintsAdded {
            return Err(self.invalid("solve"));
        }

        let outcome = backend.solve(&self.model);
        let status = outcome.status;
        match (&outcome.values, status) {
            (Some(values), SolveStatus::Optimal) => {
                for s in &mut self.problem.students {
                    s.bind_schedule(values);
                }
                for t in &mut self.problem.teachers {
                    t.bind_schedule(values);
                }
                info!(objective = ?outcome.objective_value, "model solved to optimality");
            }
            _ => warn!(%status, "solver returned no optimal solution"),
        }

        self.outcome = Some(outcome);
        self.phase = ModelPhase::Solved(status);
        Ok(status)
    }

    /// Builds deduplicated sections from the optimal binding.
    ///
    /// # Errors
    /// `InvalidState` unless the model was solved to optimality.
    pub fn materialize(&mut self) -> Result<&[Section]> {
        if self.phase != ModelPhase::Solved(SolveStatus::Optimal) {
            return Err(self.invalid("materialize"));
        }
        self.sections = materialize_sections(
            &self.problem.catalog,
            &mut self.problem.students,
            &mut self.problem.teachers,
        );
        info!(sections = self.sections.len(), "sections materialized");
        self.phase = ModelPhase::Materialized;
        Ok(&self.sections)
    }

    /// Runs every phase and reports the result.
    ///
    /// A non-optimal status is a normal outcome: the report carries it with
    /// no sections.
    pub fn run<B: SolverBackend>(&mut self, backend: &B) -> Result<TimetableReport> {
        self.add_constraints()?;
        let status = self.solve(backend)?;
        if !status.is_optimal() {
            return Ok(TimetableReport::unsolved(status));
        }
        self.materialize()?;
        Ok(self.report())
    }

    /// Report of the current state.
    pub fn report(&self) -> TimetableReport {
        let status = self
            .outcome
            .as_ref()
            .map_or(SolveStatus::NotSolved, |o| o.status);
        if self.phase != ModelPhase::Materialized {
            return TimetableReport::unsolved(status);
        }
        TimetableReport {
            status,
            objective_value: self.outcome.as_ref().and_then(|o| o.objective_value),
            sections: self.sections.iter().map(SectionView::from).collect(),
            kpi: TimetableKpi::calculate(
                &self.sections,
                &self.problem.students,
                &self.problem.teachers,
                &self.config.objective,
            ),
        }
    }

    pub fn phase(&self) -> ModelPhase {
        self.phase
    }

    /// Terminal status, once solved.
    pub fn status(&self) -> Option<SolveStatus> {
        self.outcome.as_ref().map(|o| o.status)
    }

    pub fn outcome(&self) -> Option<&SolveOutcome> {
        self.outcome.as_ref()
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn model(&self) -> &IlpModel {
        &self.model
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Materialized sections; empty before materialization.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
