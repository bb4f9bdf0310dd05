//! Student model.
//!
//! A student requests courses (core, elective, and off placeholders) in a
//! single insertion-ordered list. Off time is modelled as requested courses
//! of type [`CourseType::Off`]. Alternate electives feed only the objective.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::constraints;
use crate::ilp::{LinearConstraint, VariablePool};

use super::{Catalog, CourseId, CourseType, Participant, Schedule, Section, Tag};

/// A student.
#[derive(Debug, Clone)]
pub struct Student {
    tag: Tag,
    grade: i32,
    catalog: Rc<Catalog>,
    schedule: Schedule,
    req_all: Vec<CourseId>,
    alt_electives: Vec<CourseId>,
}

impl Student {
    /// Creates a student with no requests.
    pub fn new(tag: Tag, catalog: Rc<Catalog>, periods: usize, pool: &mut VariablePool) -> Self {
        let schedule = Schedule::new(tag, periods, catalog.len(), pool);
        Self {
            tag,
            grade: 0,
            catalog,
            schedule,
            req_all: Vec::new(),
            alt_electives: Vec::new(),
        }
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: i32) -> Self {
        self.grade = grade;
        self
    }

    pub fn grade(&self) -> i32 {
        self.grade
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Requests a course. Duplicates are ignored.
    pub fn request(&mut self, course: CourseId) {
        if !self.req_all.contains(&course) {
            self.req_all.push(course);
        }
    }

    /// Requests several courses in order.
    pub fn request_all(&mut self, courses: impl IntoIterator<Item = CourseId>) {
        for c in courses {
            self.request(c);
        }
    }

    /// Withdraws a request. No-op if absent.
    pub fn remove_request(&mut self, course: CourseId) -> bool {
        match self.req_all.iter().position(|&c| c == course) {
            Some(i) => {
                self.req_all.remove(i);
                true
            }
            None => false,
        }
    }

    /// All requests in insertion order.
    pub fn requests(&self) -> &[CourseId] {
        &self.req_all
    }

    /// Whether `course` is requested.
    pub fn is_requested(&self, course: CourseId) -> bool {
        self.req_all.contains(&course)
    }

    fn requests_of(&self, course_type: CourseType) -> Vec<CourseId> {
        self.req_all
            .iter()
            .copied()
            .filter(|&c| {
                self.catalog
                    .course(c)
                    .is_some_and(|course| course.course_type == course_type)
            })
            .collect()
    }

    pub fn requested_cores(&self) -> Vec<CourseId> {
        self.requests_of(CourseType::Core)
    }

    pub fn requested_electives(&self) -> Vec<CourseId> {
        self.requests_of(CourseType::Elective)
    }

    pub fn requested_offs(&self) -> Vec<CourseId> {
        self.requests_of(CourseType::Off)
    }

    /// Adds an alternate elective. Duplicates are ignored.
    pub fn add_alt_elective(&mut self, course: CourseId) {
        if !self.alt_electives.contains(&course) {
            self.alt_electives.push(course);
        }
    }

    /// Removes an alternate elective. No-op if absent.
    pub fn remove_alt_elective(&mut self, course: CourseId) -> bool {
        match self.alt_electives.iter().position(|&c| c == course) {
            Some(i) => {
                self.alt_electives.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn alt_electives(&self) -> &[CourseId] {
        &self.alt_electives
    }

    /// 0/1 request flag per catalog course.
    pub fn request_vector(&self) -> Vec<u8> {
        self.catalog
            .iter()
            .map(|c| u8::from(self.is_requested(c.id)))
            .collect()
    }

    /// Fixes the schedule from a solver binding.
    pub fn bind_schedule(&mut self, values: &[bool]) {
        self.schedule.bind(values);
    }

    /// Periods holding an off course.
    pub fn off_periods(&self) -> Vec<usize> {
        self.schedule
            .placements()
            .into_iter()
            .filter(|&(_, c)| self.catalog.course(c).is_some_and(|course| course.is_off()))
            .map(|(p, _)| p)
            .collect()
    }

    /// Weighted elective satisfaction: `primary` per placed requested
    /// elective, `alternate` per placed alternate elective.
    pub fn elective_score(&self, primary: f64, alternate: f64) -> f64 {
        let electives = self.requested_electives();
        self.schedule
            .placements()
            .into_iter()
            .filter(|&(_, c)| {
                self.catalog
                    .course(c)
                    .is_some_and(|course| course.course_type == CourseType::Elective)
            })
            .map(|(_, c)| {
                if electives.contains(&c) {
                    primary
                } else if self.alt_electives.contains(&c) {
                    alternate
                } else {
                    0.0
                }
            })
            .sum()
    }
}

impl Participant for Student {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn constraints(&self) -> Box<dyn Iterator<Item = LinearConstraint> + '_> {
        Box::new(
            constraints::period_exclusivity(&self.schedule).chain(constraints::request_constraints(
                &self.schedule,
                &self.catalog,
                &self.req_all,
            )),
        )
    }

    fn add_section(&mut self, section: &mut Section) -> bool {
        let accepted = self.schedule.add_section(section);
        if accepted {
            section.add_student(self.tag);
        }
        accepted
    }

    fn remove_section(&mut self, section: &mut Section) -> bool {
        let removed = self.schedule.remove_section(section);
        if removed {
            section.remove_student(self.tag);
        }
        removed
    }

    /// Requested off courses that actually landed in the schedule.
    fn open_score(&self) -> usize {
        let requested: BTreeSet<&str> = self
            .requested_offs()
            .into_iter()
            .filter_map(|c| self.catalog.course(c))
            .map(|c| c.code.as_str())
            .collect();
        let actual: BTreeSet<&str> = self
            .schedule
            .placements()
            .into_iter()
            .filter_map(|(_, c)| self.catalog.course(c))
            .filter(|c| c.is_off())
            .map(|c| c.code.as_str())
            .collect();
        requested.intersection(&actual).count()
    }

    fn free_periods(&self) -> Vec<usize> {
        let mut free: Vec<usize> = self.schedule.open_periods().collect();
        free.extend(self.off_periods());
        free.sort_unstable();
        free.dedup();
        free
    }

    fn requested_off(&self) -> usize {
        self.requested_offs().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, SectionId};

    fn catalog() -> Rc<Catalog> {
        let mut c = Catalog::new();
        c.add("MATH", CourseType::Core);
        c.add("ART", CourseType::Elective);
        c.add("MUSIC", CourseType::Elective);
        c.add("FREE", CourseType::Off);
        Rc::new(c)
    }

    fn student(periods: usize) -> (Student, VariablePool) {
        let mut pool = VariablePool::new();
        let s = Student::new(Tag(0), catalog(), periods, &mut pool);
        (s, pool)
    }

    fn section(catalog: &Catalog, id: usize, code: &str, period: usize) -> Section {
        let course: Course = catalog.get(code).unwrap().clone();
        Section::new(SectionId(id), course, period)
    }

    #[test]
    fn test_requests_are_ordered_and_unique() {
        let (mut s, _) = student(4);
        s.request_all([CourseId(2), CourseId(0), CourseId(2), CourseId(3)]);
        assert_eq!(s.requests(), &[CourseId(2), CourseId(0), CourseId(3)]);
        assert_eq!(s.requested_cores(), vec![CourseId(0)]);
        assert_eq!(s.requested_electives(), vec![CourseId(2)]);
        assert_eq!(s.requested_offs(), vec![CourseId(3)]);
        assert_eq!(s.request_vector(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_remove_request_by_value() {
        let (mut s, _) = student(4);
        s.request_all([CourseId(0), CourseId(1)]);
        assert!(s.remove_request(CourseId(0)));
        assert!(!s.remove_request(CourseId(0)));
        assert_eq!(s.requests(), &[CourseId(1)]);
    }

    #[test]
    fn test_alt_electives_add_and_remove() {
        let (mut s, _) = student(4);
        s.add_alt_elective(CourseId(2));
        s.add_alt_elective(CourseId(2));
        assert_eq!(s.alt_electives().len(), 1);
        assert!(s.remove_alt_elective(CourseId(2)));
        assert!(s.alt_electives().is_empty());
        assert!(!s.remove_alt_elective(CourseId(2)));
    }

    #[test]
    fn test_constraints_cover_periods_and_catalog() {
        let (mut s, _) = student(3);
        s.request(CourseId(0));
        let cs: Vec<_> = s.constraints().collect();
        // 3 periods + 4 catalog courses
        assert_eq!(cs.len(), 7);
        let request_rhs: Vec<f64> = cs[3..].iter().map(|c| c.rhs).collect();
        assert_eq!(request_rhs, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_add_section_joins_roster_once() {
        let (mut s, _) = student(2);
        let catalog = catalog();
        let mut a = section(&catalog, 0, "MATH", 0);
        let mut b = section(&catalog, 1, "ART", 0);

        assert!(s.add_section(&mut a));
        assert!(a.has_student(Tag(0)));
        assert!(!s.add_section(&mut b));
        assert!(!b.has_student(Tag(0)));

        assert!(s.remove_section(&mut a));
        assert!(!a.has_student(Tag(0)));
        assert!(!s.remove_section(&mut a));
    }

    #[test]
    fn test_add_to_section_skips_occupied_period() {
        let (mut s, _) = student(2);
        let catalog = catalog();
        let mut math = section(&catalog, 0, "MATH", 1);
        let mut art = section(&catalog, 1, "ART", 1);

        s.add_to_section(&mut math);
        s.add_to_section(&mut art);
        assert!(math.has_student(Tag(0)));
        assert!(!art.has_student(Tag(0)));
        assert_eq!(s.schedule().slot(1).unwrap().section, SectionId(0));
    }

    #[test]
    fn test_open_score_and_elective_score() {
        let (mut s, _) = student(3);
        s.request_all([CourseId(0), CourseId(1), CourseId(3)]);
        s.add_alt_elective(CourseId(2));
        let catalog = catalog();

        let mut math = section(&catalog, 0, "MATH", 0);
        let mut music = section(&catalog, 1, "MUSIC", 1);
        let mut free = section(&catalog, 2, "FREE", 2);
        s.add_to_section(&mut math);
        s.add_to_section(&mut music);
        assert_eq!(s.open_score(), 0);
        s.add_to_section(&mut free);

        assert_eq!(s.open_score(), 1);
        assert_eq!(s.free_periods(), vec![2]);
        assert_eq!(s.off_delta(), 0);
        assert!((s.elective_score(5.0, 1.0) - 1.0).abs() < 1e-9);
    }
}
