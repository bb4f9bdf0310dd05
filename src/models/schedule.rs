//! Per-individual schedule.
//!
//! A schedule owns a period × course matrix of binary decision variables.
//! Before solving the variables are free unknowns; once a solver binding is
//! applied each cell is fixed to 0/1. Independently of the binding, the
//! schedule records which section occupies each period, which is what
//! `add_section`/`remove_section` mutate.

use crate::ilp::{LinearExpr, VarId, VariablePool};

use super::{CourseId, Section, SectionId, Tag};

/// A section recorded in a period slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub course: CourseId,
    pub section: SectionId,
}

/// Decision-variable schedule of one individual.
#[derive(Debug, Clone)]
pub struct Schedule {
    owner: Tag,
    periods: usize,
    /// `vars[period][course]`.
    vars: Vec<Vec<VarId>>,
    /// Solver binding, same shape as `vars`.
    binding: Option<Vec<Vec<bool>>>,
    slots: Vec<Option<Slot>>,
}

impl Schedule {
    /// Creates a schedule, allocating `periods × course_count` variables.
    pub fn new(owner: Tag, periods: usize, course_count: usize, pool: &mut VariablePool) -> Self {
        let vars = (0..periods)
            .map(|p| {
                (0..course_count)
                    .map(|c| pool.add(format!("x_{}_{}_{}", owner.0, p, c)))
                    .collect()
            })
            .collect();
        Self {
            owner,
            periods,
            vars,
            binding: None,
            slots: vec![None; periods],
        }
    }

    /// Tag of the owning individual.
    pub fn owner(&self) -> Tag {
        self.owner
    }

    /// Number of periods.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Number of course columns.
    pub fn course_count(&self) -> usize {
        self.vars.first().map_or(0, Vec::len)
    }

    /// Decision variable for (`period`, `course`).
    pub fn var(&self, period: usize, course: CourseId) -> VarId {
        self.vars[period][course.index()]
    }

    /// Rows of decision variables, one per period.
    pub fn rows(&self) -> &[Vec<VarId>] {
        &self.vars
    }

    /// Σ over periods of the variables of `course`.
    pub fn course_total(&self, course: CourseId) -> LinearExpr {
        LinearExpr::sum(self.vars.iter().map(|row| row[course.index()]))
    }

    /// Σ over courses of the variables of `period`.
    pub fn period_total(&self, period: usize) -> LinearExpr {
        LinearExpr::sum(self.vars[period].iter().copied())
    }

    /// Σ of every variable in the matrix.
    pub fn total(&self) -> LinearExpr {
        LinearExpr::sum(self.vars.iter().flatten().copied())
    }

    /// Fixes every cell from a solver binding indexed by [`VarId`].
    pub fn bind(&mut self, values: &[bool]) {
        let binding = self
            .vars
            .iter()
            .map(|row| row.iter().map(|v| values.get(v.0).copied().unwrap_or(false)).collect())
            .collect();
        self.binding = Some(binding);
    }

    /// Whether a solver binding has been applied.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Bound value of a cell; `None` before solving.
    pub fn value(&self, period: usize, course: CourseId) -> Option<bool> {
        self.binding.as_ref().map(|b| b[period][course.index()])
    }

    /// Cells bound to 1, in (period, course) order. Empty before solving.
    pub fn assigned_cells(&self) -> impl Iterator<Item = (usize, CourseId)> + '_ {
        self.binding.iter().flat_map(|b| {
            b.iter().enumerate().flat_map(|(p, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, on)| **on)
                    .map(move |(c, _)| (p, CourseId(c)))
            })
        })
    }

    /// Course placements as (period, course).
    ///
    /// Reads the solver binding when present, otherwise the section slots.
    pub fn placements(&self) -> Vec<(usize, CourseId)> {
        if self.is_bound() {
            self.assigned_cells().collect()
        } else {
            self.sections().map(|(p, slot)| (p, slot.course)).collect()
        }
    }

    /// Periods with no course.
    ///
    /// After solving this reads the binding; before solving it reads the
    /// section slots.
    pub fn open_periods(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.periods).filter(move |&p| match &self.binding {
            Some(b) => !b[p].iter().any(|&on| on),
            None => self.slots[p].is_none(),
        })
    }

    /// Records `section` in its period.
    ///
    /// Returns `true` if the period was free. An occupied period rejects the
    /// section and the schedule is left unchanged.
    pub fn add_section(&mut self, section: &Section) -> bool {
        match self.slots.get_mut(section.period) {
            Some(slot) if slot.is_none() => {
                *slot = Some(Slot {
                    course: section.course.id,
                    section: section.id,
                });
                true
            }
            _ => false,
        }
    }

    /// Clears the period of `section` if that section occupies it.
    ///
    /// Returns whether anything was removed.
    pub fn remove_section(&mut self, section: &Section) -> bool {
        match self.slots.get_mut(section.period) {
            Some(slot) if slot.map(|s| s.section) == Some(section.id) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Section occupying `period`.
    pub fn slot(&self, period: usize) -> Option<Slot> {
        self.slots.get(period).copied().flatten()
    }

    /// Occupied slots in period order.
    pub fn sections(&self) -> impl Iterator<Item = (usize, Slot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(p, s)| s.map(|s| (p, s)))
    }
}
