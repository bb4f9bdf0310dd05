//! Synthetic problem generator.
//!
//! Produces seeded toy problems for experiments and tests. Courses are
//! dealt round-robin into pathways; each student follows one pathway and
//! requests up to `num_periods` of its courses. Every course gets at least
//! one qualified teacher, and teachers pick up extra qualifications at
//! random. Feasibility is not guaranteed.

use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::CourseType;
use crate::problem::{ProblemInput, StudentInput, TeacherInput};

/// Toy problem parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToyProblem {
    pub num_teachers: usize,
    pub num_students: usize,
    pub num_courses: usize,
    pub num_periods: usize,
    pub num_pathways: usize,
    /// Probability that a teacher gains each additional qualification.
    pub extra_qualification_rate: f64,
    /// Every `elective_stride`-th course is an elective (0 = none).
    pub elective_stride: usize,
}

impl ToyProblem {
    pub fn new(
        num_teachers: usize,
        num_students: usize,
        num_courses: usize,
        num_periods: usize,
        num_pathways: usize,
    ) -> Self {
        Self {
            num_teachers,
            num_students,
            num_courses,
            num_periods,
            num_pathways: num_pathways.max(1),
            extra_qualification_rate: 0.2,
            elective_stride: 3,
        }
    }

    /// Sets the extra-qualification probability, clamped to `[0, 1]`. A
    /// non-finite rate counts as 0.
    pub fn with_extra_qualification_rate(mut self, rate: f64) -> Self {
        self.extra_qualification_rate = Self::probability(rate);
        self
    }

    pub fn with_elective_stride(mut self, stride: usize) -> Self {
        self.elective_stride = stride;
        self
    }

    fn probability(rate: f64) -> f64 {
        if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn course_code(index: usize) -> String {
        format!("C{index}")
    }

    /// Generates a problem from a seed.
    pub fn generate(&self, seed: u64) -> ProblemInput {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut input = ProblemInput::new(self.num_periods);

        for i in 0..self.num_courses {
            let elective =
                self.elective_stride > 0 && i % self.elective_stride == self.elective_stride - 1;
            let course_type = if elective {
                CourseType::Elective
            } else {
                CourseType::Core
            };
            input = input.with_course(Self::course_code(i), course_type);
        }

        let num_pathways = self.num_pathways.max(1);
        let pathways: Vec<Vec<usize>> = (0..num_pathways)
            .map(|p| (0..self.num_courses).filter(|c| c % num_pathways == p).collect())
            .collect();

        for _ in 0..self.num_students {
            let pathway = &pathways[rng.random_range(0..num_pathways)];
            let take = self.num_periods.min(pathway.len());
            let requests: Vec<String> = pathway
                .choose_multiple(&mut rng, take)
                .map(|&c| Self::course_code(c))
                .collect();
            input = input.with_student(StudentInput::new(requests));
        }

        if self.num_teachers > 0 {
            let mut qualifications: Vec<Vec<usize>> = vec![Vec::new(); self.num_teachers];
            for c in 0..self.num_courses {
                qualifications[c % self.num_teachers].push(c);
            }
            let rate = Self::probability(self.extra_qualification_rate);
            for quals in &mut qualifications {
                for c in 0..self.num_courses {
                    if !quals.contains(&c) && rng.random_bool(rate) {
                        quals.push(c);
                    }
                }
                quals.sort_unstable();
            }
            for quals in qualifications {
                let codes = quals.into_iter().map(Self::course_code);
                input = input.with_teacher(TeacherInput::new(codes));
            }
        }

        input
    }
}
