//! Objective builder.
//!
//! The model minimises total unmet preference cost. For each student:
//!
//! ```text
//! cost = Σ_{e ∈ requested electives} w_primary · (1 − Σ_p x[p][e])
//!      + Σ_{a ∈ alternate electives} w_alternate · (1 − Σ_p x[p][a])
//! ```
//!
//! Core and off requests are hard constraints and never appear here. An
//! optional teaching-load term adds `w_load · Σ x` per teacher, which
//! discourages sections that nobody attends.

use crate::config::ObjectiveWeights;
use crate::ilp::LinearExpr;
use crate::models::{Participant, Student, Teacher};

/// Unmet elective cost of one student.
pub fn elective_cost(student: &Student, weights: &ObjectiveWeights) -> LinearExpr {
    let schedule = student.schedule();
    let mut cost = LinearExpr::new();
    let primaries = student.requested_electives();

    let weighted = primaries
        .iter()
        .map(|&c| (c, weights.primary_elective_weight))
        .chain(
            student
                .alt_electives()
                .iter()
                .filter(|c| !primaries.contains(c))
                .map(|&c| (c, weights.alternate_elective_weight)),
        );
    for (course, weight) in weighted {
        if weight == 0.0 {
            continue;
        }
        let mut unmet = LinearExpr::new();
        unmet.add_constant(1.0);
        unmet.add_scaled(&schedule.course_total(course), -1.0);
        cost.add_scaled(&unmet, weight);
    }
    cost
}

/// Teaching-load cost of one teacher.
pub fn teaching_load_cost(teacher: &Teacher, weights: &ObjectiveWeights) -> LinearExpr {
    let mut cost = LinearExpr::new();
    if weights.teaching_load_weight > 0.0 {
        cost.add_scaled(&teacher.schedule().total(), weights.teaching_load_weight);
    }
    cost
}

/// Full objective over all individuals.
pub fn build_objective(
    students: &[Student],
    teachers: &[Teacher],
    weights: &ObjectiveWeights,
) -> LinearExpr {
    let mut objective = LinearExpr::new();
    for s in students {
        objective.add_scaled(&elective_cost(s, weights), 1.0);
    }
    for t in teachers {
        objective.add_scaled(&teaching_load_cost(t, weights), 1.0);
    }
    objective
}
