//! Section materialization.
//!
//! Turns bound decision variables into concrete sections. Each cell set to
//! 1 yields a candidate (course, period) with no instructor; a candidate
//! whose key matches an existing section is merged into it instead of
//! creating a duplicate. Students are processed before teachers and each
//! group in tag order, so identical solver output always merges the same
//! way.

use tracing::debug;

use crate::models::{Catalog, Participant, Section, SectionId, SectionKey, Student, Teacher};

/// Builds deduplicated sections from bound schedules.
///
/// Every individual is attached to its sections (roster growth for
/// students, instructor binding for teachers).
pub fn materialize_sections(
    catalog: &Catalog,
    students: &mut [Student],
    teachers: &mut [Teacher],
) -> Vec<Section> {
    let mut sections = Vec::new();

    for i in tag_order(students) {
        attach(catalog, &mut students[i], &mut sections);
    }
    for i in tag_order(teachers) {
        attach(catalog, &mut teachers[i], &mut sections);
    }

    debug!(sections = sections.len(), "sections materialized");
    sections
}

fn tag_order<P: Participant>(individuals: &[P]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..individuals.len()).collect();
    order.sort_by_key(|&i| individuals[i].tag());
    order
}

fn attach<P: Participant>(catalog: &Catalog, individual: &mut P, sections: &mut Vec<Section>) {
    let cells: Vec<_> = individual.schedule().assigned_cells().collect();
    for (period, course_id) in cells {
        let Some(course) = catalog.course(course_id) else {
            continue;
        };
        let key = SectionKey::unassigned(course.code.clone(), period);
        let index = match sections.iter().position(|s| s.matches(&key)) {
            Some(i) => i,
            None => {
                let id = SectionId(sections.len());
                sections.push(Section::new(id, course.clone(), period));
                id.0
            }
        };
        individual.add_to_section(&mut sections[index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ilp::VariablePool;
    use crate::models::{CourseId, CourseType, Tag};
    use std::rc::Rc;

    struct Fixture {
        catalog: Rc<Catalog>,
        students: Vec<Student>,
        teachers: Vec<Teacher>,
        values: Vec<bool>,
    }

    /// Two students in C0 at period 0; two teachers, both bound to C0 at
    /// period 0; the second student also in C1 at period 1.
    fn fixture() -> Fixture {
        let mut catalog = Catalog::new();
        catalog.add("C0", CourseType::Core);
        catalog.add("C1", CourseType::Core);
        let catalog = Rc::new(catalog);
        let mut pool = VariablePool::new();

        let students: Vec<Student> = (0..2)
            .map(|i| Student::new(Tag(i), Rc::clone(&catalog), 2, &mut pool))
            .collect();
        let teachers: Vec<Teacher> = (2..4)
            .map(|i| Teacher::new(Tag(i), Rc::clone(&catalog), 2, &mut pool))
            .collect();

        let mut values = vec![false; pool.len()];
        for s in &students {
            values[s.schedule().var(0, CourseId(0)).0] = true;
        }
        values[students[1].schedule().var(1, CourseId(1)).0] = true;
        for t in &teachers {
            values[t.schedule().var(0, CourseId(0)).0] = true;
        }

        Fixture {
            catalog,
            students,
            teachers,
            values,
        }
    }

    fn bind_all(f: &mut Fixture) {
        for s in &mut f.students {
            s.bind_schedule(&f.values);
        }
        for t in &mut f.teachers {
            t.bind_schedule(&f.values);
        }
    }

    #[test]
    fn test_students_merge_into_one_section() {
        let mut f = fixture();
        bind_all(&mut f);
        let sections = materialize_sections(&f.catalog, &mut f.students, &mut f.teachers);

        let c0: Vec<_> = sections
            .iter()
            .filter(|s| s.course.code == "C0" && s.period == 0)
            .collect();
        // first teacher binds to the shared section, the second opens its own
        assert_eq!(c0.len(), 2);
        assert_eq!(c0[0].roster().collect::<Vec<_>>(), vec![Tag(0), Tag(1)]);
        assert_eq!(c0[0].instructor(), Some(Tag(2)));
        assert_eq!(c0[1].roster_len(), 0);
        assert_eq!(c0[1].instructor(), Some(Tag(3)));

        let c1: Vec<_> = sections.iter().filter(|s| s.course.code == "C1").collect();
        assert_eq!(c1.len(), 1);
        assert_eq!(c1[0].instructor(), None);
    }

    #[test]
    fn test_teacher_open_periods_updated() {
        let mut f = fixture();
        bind_all(&mut f);
        materialize_sections(&f.catalog, &mut f.students, &mut f.teachers);
        assert_eq!(f.teachers[0].open_periods().collect::<Vec<_>>(), vec![1]);
        assert_eq!(f.students[1].schedule().sections().count(), 2);
    }

    #[test]
    fn test_input_order_does_not_change_result() {
        let mut a = fixture();
        bind_all(&mut a);
        let first = materialize_sections(&a.catalog, &mut a.students, &mut a.teachers);

        let mut b = fixture();
        bind_all(&mut b);
        b.students.reverse();
        b.teachers.reverse();
        let second = materialize_sections(&b.catalog, &mut b.students, &mut b.teachers);

        let content = |sections: &[Section]| -> Vec<_> {
            sections
                .iter()
                .map(|s| (s.key(), s.roster().collect::<Vec<_>>()))
                .collect()
        };
        assert_eq!(content(&first), content(&second));
    }

    #[test]
    fn test_unbound_schedules_produce_nothing() {
        let mut f = fixture();
        let sections = materialize_sections(&f.catalog, &mut f.students, &mut f.teachers);
        assert!(sections.is_empty());
    }
}
