//! Run results and quality metrics.
//!
//! A [`TimetableReport`] is what the reporting collaborator consumes: the
//! terminal status plus the materialized sections, each exposing course
//! code, period, instructor, and roster.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Section count | Number of materialized sections |
//! | Avg roster size | Mean students per section |
//! | Idle sections | Sections with an instructor and no students |
//! | Uncovered sections | Sections with students and no instructor |
//! | Student open score | Σ satisfied off requests over students |
//! | Teacher open score | Σ open periods over teachers |
//! | Elective score | Σ weighted elective satisfaction over students |

use serde::Serialize;

use crate::config::ObjectiveWeights;
use crate::ilp::SolveStatus;
use crate::models::{Participant, Section, Student, Teacher};

/// Reporting view of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub course: String,
    pub period: usize,
    /// Instructor tag number, if any.
    pub instructor: Option<u32>,
    /// Student tag numbers in ascending order.
    pub roster: Vec<u32>,
}

impl From<&Section> for SectionView {
    fn from(s: &Section) -> Self {
        Self {
            course: s.course.code.clone(),
            period: s.period,
            instructor: s.instructor().map(|t| t.0),
            roster: s.roster().map(|t| t.0).collect(),
        }
    }
}

/// Timetable quality indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimetableKpi {
    pub section_count: usize,
    pub avg_roster_size: f64,
    pub idle_sections: usize,
    pub uncovered_sections: usize,
    pub student_open_score: usize,
    pub teacher_open_score: usize,
    pub elective_score: f64,
}

impl TimetableKpi {
    /// Computes KPIs from materialized sections and the individuals.
    pub fn calculate(
        sections: &[Section],
        students: &[Student],
        teachers: &[Teacher],
        weights: &ObjectiveWeights,
    ) -> Self {
        let section_count = sections.len();
        let enrolled: usize = sections.iter().map(Section::roster_len).sum();
        let avg_roster_size = if section_count > 0 {
            enrolled as f64 / section_count as f64
        } else {
            0.0
        };

        Self {
            section_count,
            avg_roster_size,
            idle_sections: sections
                .iter()
                .filter(|s| s.roster_len() == 0 && s.instructor().is_some())
                .count(),
            uncovered_sections: sections
                .iter()
                .filter(|s| s.roster_len() > 0 && s.instructor().is_none())
                .count(),
            student_open_score: students.iter().map(Participant::open_score).sum(),
            teacher_open_score: teachers.iter().map(Participant::open_score).sum(),
            elective_score: students
                .iter()
                .map(|s| {
                    s.elective_score(
                        weights.primary_elective_weight,
                        weights.alternate_elective_weight,
                    )
                })
                .sum(),
        }
    }
}

/// Final result of a timetable run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableReport {
    pub status: SolveStatus,
    /// Objective value; present only when optimal.
    pub objective_value: Option<f64>,
    /// Empty unless the status is optimal.
    pub sections: Vec<SectionView>,
    pub kpi: TimetableKpi,
}

impl TimetableReport {
    /// A report for a run that ended without an optimal solution.
    pub fn unsolved(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            sections: Vec::new(),
            kpi: TimetableKpi::default(),
        }
    }

    /// Sections of a given course.
    pub fn sections_for_course(&self, code: &str) -> Vec<&SectionView> {
        self.sections.iter().filter(|s| s.course == code).collect()
    }

    /// Sections meeting in a given period.
    pub fn sections_in_period(&self, period: usize) -> Vec<&SectionView> {
        self.sections.iter().filter(|s| s.period == period).collect()
    }
}
