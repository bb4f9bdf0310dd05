//! Constraint compiler.
//!
//! Turns scheduling rules into linear (in)equalities over schedule
//! decision variables. Every generator yields a finite iterator whose
//! emission order is deterministic (period-major, then catalog order).
//!
//! | Rule | Form |
//! |------|------|
//! | One course per period | Σ_c x[p][c] ≤ 1 |
//! | Student requests | Σ_p x[p][c] = 1 if requested else 0 |
//! | Teacher qualifications | Σ_p x[p][c] ≤ 1 if qualified else 0 |
//! | Teacher open periods | Σ x ≤ periods − requested_open |
//! | Coverage | Σ_{qualified t} t.x[p][c] ≥ s.x[p][c] |

use std::collections::BTreeSet;

use crate::ilp::{LinearConstraint, LinearExpr};
use crate::models::{Catalog, CourseId, Participant, Schedule, Student, Teacher};

/// At most one course per period for the schedule's owner.
pub fn period_exclusivity(schedule: &Schedule) -> impl Iterator<Item = LinearConstraint> + '_ {
    (0..schedule.periods()).map(move |p| schedule.period_total(p).leq(1.0))
}

/// Every requested course appears in exactly one period; every other
/// catalog course appears in none.
pub fn request_constraints<'a>(
    schedule: &'a Schedule,
    catalog: &'a Catalog,
    requested: &'a [CourseId],
) -> impl Iterator<Item = LinearConstraint> + 'a {
    catalog.iter().map(move |course| {
        let rhs = if requested.contains(&course.id) { 1.0 } else { 0.0 };
        schedule.course_total(course.id).eq(rhs)
    })
}

/// An unqualified course is never taught; a qualified one at most once.
pub fn qualification_constraints<'a>(
    schedule: &'a Schedule,
    catalog: &'a Catalog,
    qualifications: &'a BTreeSet<CourseId>,
) -> impl Iterator<Item = LinearConstraint> + 'a {
    catalog.iter().map(move |course| {
        let rhs = if qualifications.contains(&course.id) { 1.0 } else { 0.0 };
        schedule.course_total(course.id).leq(rhs)
    })
}

/// Caps total teaching so that `requested_open` periods stay free.
///
/// Returns `None` when nothing is requested.
pub fn open_period_constraint(
    schedule: &Schedule,
    requested_open: usize,
) -> Option<LinearConstraint> {
    if requested_open == 0 || schedule.course_count() == 0 || schedule.periods() == 0 {
        return None;
    }
    let cap = schedule.periods().saturating_sub(requested_open) as f64;
    Some(schedule.total().leq(cap))
}

/// Cross-individual coverage: a student attending (period, course) needs
/// at least one qualified teacher assigned to that exact cell.
///
/// With no qualified teacher the constraint pins the student's variable to
/// zero, which makes any request for the course infeasible. Off courses are
/// skipped when `exempt_off` is set.
pub fn coverage_constraints<'a>(
    students: &'a [Student],
    teachers: &'a [Teacher],
    catalog: &'a Catalog,
    exempt_off: bool,
) -> impl Iterator<Item = LinearConstraint> + 'a {
    students.iter().flat_map(move |student| {
        let schedule = student.schedule();
        (0..schedule.periods()).flat_map(move |period| {
            catalog
                .iter()
                .filter(move |course| !(exempt_off && course.is_off()))
                .map(move |course| {
                    let mut lhs = LinearExpr::sum(
                        teachers
                            .iter()
                            .filter(|t| t.is_qualified(course.id))
                            .map(|t| t.schedule().var(period, course.id)),
                    );
                    lhs.add_term(schedule.var(period, course.id), -1.0);
                    lhs.geq(0.0)
                })
        })
    })
}
