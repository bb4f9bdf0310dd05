//! Teacher model.
//!
//! A teacher may teach the courses it is qualified for, each at most once.
//! Open periods are kept as an owned ordered set, updated only through
//! section add/remove. Off time is a requested count of open periods.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::constraints;
use crate::ilp::{LinearConstraint, VariablePool};

use super::{Catalog, CourseId, Participant, Schedule, Section, Tag};

/// A teacher.
#[derive(Debug, Clone)]
pub struct Teacher {
    tag: Tag,
    catalog: Rc<Catalog>,
    schedule: Schedule,
    qualifications: BTreeSet<CourseId>,
    open_periods: BTreeSet<usize>,
    requested_open_periods: usize,
}

impl Teacher {
    /// Creates an unqualified teacher with every period open.
    pub fn new(tag: Tag, catalog: Rc<Catalog>, periods: usize, pool: &mut VariablePool) -> Self {
        let schedule = Schedule::new(tag, periods, catalog.len(), pool);
        Self {
            tag,
            catalog,
            schedule,
            qualifications: BTreeSet::new(),
            open_periods: (0..periods).collect(),
            requested_open_periods: 0,
        }
    }

    /// Sets the number of periods the teacher wants kept free.
    pub fn with_requested_open_periods(mut self, count: usize) -> Self {
        self.requested_open_periods = count;
        self
    }

    pub fn requested_open_periods(&self) -> usize {
        self.requested_open_periods
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn add_qualification(&mut self, course: CourseId) {
        self.qualifications.insert(course);
    }

    pub fn add_qualifications(&mut self, courses: impl IntoIterator<Item = CourseId>) {
        self.qualifications.extend(courses);
    }

    /// Removes a qualification. No-op if absent.
    pub fn remove_qualification(&mut self, course: CourseId) -> bool {
        self.qualifications.remove(&course)
    }

    pub fn is_qualified(&self, course: CourseId) -> bool {
        self.qualifications.contains(&course)
    }

    pub fn qualifications(&self) -> &BTreeSet<CourseId> {
        &self.qualifications
    }

    /// 0/1 qualification flag per catalog course.
    pub fn qualification_vector(&self) -> Vec<u8> {
        self.catalog
            .iter()
            .map(|c| u8::from(self.is_qualified(c.id)))
            .collect()
    }

    /// Fixes the schedule from a solver binding.
    pub fn bind_schedule(&mut self, values: &[bool]) {
        self.schedule.bind(values);
    }

    /// Open periods in ascending order.
    pub fn open_periods(&self) -> impl Iterator<Item = usize> + '_ {
        self.open_periods.iter().copied()
    }

    pub fn is_open(&self, period: usize) -> bool {
        self.open_periods.contains(&period)
    }
}

impl Participant for Teacher {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn constraints(&self) -> Box<dyn Iterator<Item = LinearConstraint> + '_> {
        Box::new(
            constraints::period_exclusivity(&self.schedule)
                .chain(constraints::qualification_constraints(
                    &self.schedule,
                    &self.catalog,
                    &self.qualifications,
                ))
                .chain(constraints::open_period_constraint(
                    &self.schedule,
                    self.requested_open_periods,
                )),
        )
    }

    fn add_section(&mut self, section: &mut Section) -> bool {
        let accepted = self.schedule.add_section(section);
        if accepted {
            self.open_periods.remove(&section.period);
            section.change_instructor(Some(self.tag));
        }
        accepted
    }

    fn remove_section(&mut self, section: &mut Section) -> bool {
        let removed = self.schedule.remove_section(section);
        if removed {
            if section.instructor() == Some(self.tag) {
                section.change_instructor(None);
            }
            self.open_periods.insert(section.period);
        }
        removed
    }

    /// Number of open periods.
    fn open_score(&self) -> usize {
        self.open_periods.len()
    }

    fn free_periods(&self) -> Vec<usize> {
        self.open_periods.iter().copied().collect()
    }

    fn requested_off(&self) -> usize {
        self.requested_open_periods
    }
}
