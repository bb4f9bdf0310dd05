//! Problem input and construction.
//!
//! [`ProblemInput`] is the raw, serde-friendly description supplied by an
//! input collaborator (CSV reader, generator, JSON file): course codes as
//! strings, one entry per individual. [`Problem`] is the built form: a
//! shared [`Catalog`], tagged students and teachers with their decision
//! schedules, and the variable pool backing them.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::ilp::VariablePool;
use crate::models::{Catalog, CourseId, CourseType, Student, TagAllocator, Teacher};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Raw problem description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemInput {
    /// Number of periods in the timetable.
    pub periods: usize,
    /// Course universe, in catalog order.
    pub courses: Vec<CourseInput>,
    #[serde(default)]
    pub students: Vec<StudentInput>,
    #[serde(default)]
    pub teachers: Vec<TeacherInput>,
}

/// Raw course entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInput {
    pub code: String,
    #[serde(default = "default_course_type")]
    pub course_type: CourseType,
}

fn default_course_type() -> CourseType {
    CourseType::Core
}

/// Raw student entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub grade: i32,
    /// Requested course codes (core, elective, off).
    pub requests: Vec<String>,
    #[serde(default)]
    pub alt_electives: Vec<String>,
}

/// Raw teacher entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherInput {
    /// Course codes the teacher may teach.
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub requested_open_periods: usize,
}

impl ProblemInput {
    /// Creates an input with `periods` periods and nothing else.
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            ..Self::default()
        }
    }

    pub fn with_course(mut self, code: impl Into<String>, course_type: CourseType) -> Self {
        self.courses.push(CourseInput {
            code: code.into(),
            course_type,
        });
        self
    }

    pub fn with_student(mut self, student: StudentInput) -> Self {
        self.students.push(student);
        self
    }

    pub fn with_teacher(mut self, teacher: TeacherInput) -> Self {
        self.teachers.push(teacher);
        self
    }
}

impl StudentInput {
    pub fn new<S: Into<String>>(requests: impl IntoIterator<Item = S>) -> Self {
        Self {
            grade: 0,
            requests: requests.into_iter().map(Into::into).collect(),
            alt_electives: Vec::new(),
        }
    }

    pub fn with_grade(mut self, grade: i32) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_alternates<S: Into<String>>(mut self, codes: impl IntoIterator<Item = S>) -> Self {
        self.alt_electives = codes.into_iter().map(Into::into).collect();
        self
    }
}

impl TeacherInput {
    pub fn new<S: Into<String>>(qualifications: impl IntoIterator<Item = S>) -> Self {
        Self {
            qualifications: qualifications.into_iter().map(Into::into).collect(),
            requested_open_periods: 0,
        }
    }

    pub fn with_requested_open_periods(mut self, count: usize) -> Self {
        self.requested_open_periods = count;
        self
    }
}

/// A built problem, ready for model assembly.
#[derive(Debug, Clone)]
pub struct Problem {
    pub(crate) catalog: Rc<Catalog>,
    pub(crate) periods: usize,
    pub(crate) students: Vec<Student>,
    pub(crate) teachers: Vec<Teacher>,
    pub(crate) pool: VariablePool,
}

impl Problem {
    /// Builds catalog, students, and teachers from raw input.
    ///
    /// Students receive tags first, then teachers, in input order.
    ///
    /// # Errors
    /// `Validation` if any code does not resolve to a catalog course.
    pub fn from_input(input: &ProblemInput, tags: &mut TagAllocator) -> Result<Self> {
        let mut catalog = Catalog::new();
        for c in &input.courses {
            catalog.add(c.code.clone(), c.course_type);
        }
        let catalog = Rc::new(catalog);

        let mut errors = Vec::new();
        let mut resolve = |codes: &[String], who: String| -> Vec<CourseId> {
            codes
                .iter()
                .filter_map(|code| match catalog.get(code) {
                    Some(c) => Some(c.id),
                    None => {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownCourse,
                            format!("{who} references unknown course '{code}'"),
                        ));
                        None
                    }
                })
                .collect()
        };

        let mut pool = VariablePool::new();
        let mut students = Vec::with_capacity(input.students.len());
        for (i, raw) in input.students.iter().enumerate() {
            let mut student =
                Student::new(tags.allocate(), Rc::clone(&catalog), input.periods, &mut pool)
                    .with_grade(raw.grade);
            student.request_all(resolve(&raw.requests, format!("Student {i}")));
            for alt in resolve(&raw.alt_electives, format!("Student {i}")) {
                student.add_alt_elective(alt);
            }
            students.push(student);
        }

        let mut teachers = Vec::with_capacity(input.teachers.len());
        for (i, raw) in input.teachers.iter().enumerate() {
            let mut teacher =
                Teacher::new(tags.allocate(), Rc::clone(&catalog), input.periods, &mut pool)
                    .with_requested_open_periods(raw.requested_open_periods);
            teacher.add_qualifications(resolve(&raw.qualifications, format!("Teacher {i}")));
            teachers.push(teacher);
        }

        if !errors.is_empty() {
            return Err(TimetableError::Validation(errors));
        }

        debug!(
            courses = catalog.len(),
            periods = input.periods,
            students = students.len(),
            teachers = teachers.len(),
            variables = pool.len(),
            "problem built"
        );

        Ok(Self {
            catalog,
            periods: input.periods,
            students,
            teachers,
            pool,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn variables(&self) -> &VariablePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Tag};

    #[test]
    fn test_build_assigns_tags_students_first() {
        let input = ProblemInput::new(2)
            .with_course("C0", CourseType::Core)
            .with_course("C1", CourseType::Elective)
            .with_teacher(TeacherInput::new(["C0"]))
            .with_student(StudentInput::new(["C0", "C1"]).with_grade(11))
            .with_student(StudentInput::new(["C1"]));

        let mut tags = TagAllocator::new();
        let problem = Problem::from_input(&input, &mut tags).unwrap();

        assert_eq!(problem.students()[0].tag(), Tag(0));
        assert_eq!(problem.students()[1].tag(), Tag(1));
        assert_eq!(problem.teachers()[0].tag(), Tag(2));
        assert_eq!(problem.students()[0].grade(), 11);
        assert_eq!(problem.students()[0].requests(), &[CourseId(0), CourseId(1)]);
        assert!(problem.teachers()[0].is_qualified(CourseId(0)));
        // 3 individuals × 2 periods × 2 courses
        assert_eq!(problem.variables().len(), 12);
    }

    #[test]
    fn test_unknown_code_is_validation_error() {
        let input = ProblemInput::new(1)
            .with_course("C0", CourseType::Core)
            .with_student(StudentInput::new(["NOPE"]));
        let err = Problem::from_input(&input, &mut TagAllocator::new()).unwrap_err();
        assert!(matches!(err, TimetableError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_deserialize_json_input() {
        let json = r#"{
            "periods": 3,
            "courses": [
                {"code": "MATH"},
                {"code": "ART", "course_type": "ELECTIVE"},
                {"code": "LUNCH", "course_type": "OFF"}
            ],
            "students": [{"grade": 12, "requests": ["MATH", "LUNCH"]}],
            "teachers": [{"qualifications": ["MATH"], "requested_open_periods": 1}]
        }"#;
        let input: ProblemInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.courses[0].course_type, CourseType::Core);
        assert_eq!(input.courses[2].course_type, CourseType::Off);
        assert_eq!(input.teachers[0].requested_open_periods, 1);

        let problem = Problem::from_input(&input, &mut TagAllocator::new()).unwrap();
        assert_eq!(problem.students()[0].requested_offs(), vec![CourseId(2)]);
    }
}
