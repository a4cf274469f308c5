//! Capabilities a `Student` exposes to the rest of the register.

use crate::domain::model::{Course, Enrollment, Person, Student};
use crate::utils::error::{RegisterError, Result};

/// Anyone who can sign in to the register.
pub trait User {
    fn person(&self) -> &Person;

    fn login(&self) -> String {
        let message = format!("{} logged in.", self.person().full_name);
        tracing::info!("{}", message);
        message
    }

    fn logout(&self) -> String {
        let message = format!("{} logged out.", self.person().full_name);
        tracing::info!("{}", message);
        message
    }
}

pub trait Learner {
    /// Adds an unscored enrollment. Rejects a second enrollment for the same course name.
    fn register_course(&mut self, course: &Course) -> Result<&Enrollment>;

    /// Overwrites the score for an existing enrollment. Range checks belong to the caller.
    fn take_exam(&mut self, course_name: &str, score: f64) -> Result<()>;
}

impl User for Student {
    fn person(&self) -> &Person {
        Student::person(self)
    }
}

impl Learner for Student {
    fn register_course(&mut self, course: &Course) -> Result<&Enrollment> {
        if self.enrollment(course.name()).is_some() {
            return Err(RegisterError::AlreadyEnrolled {
                course: course.name().to_string(),
            });
        }
        self.push_enrollment(Enrollment::new(course.clone()));
        tracing::debug!("{} enrolled in {}", self.email(), course.name());
        self.enrollments()
            .last()
            .ok_or_else(|| RegisterError::Internal {
                message: "enrollment vanished after insert".to_string(),
            })
    }

    fn take_exam(&mut self, course_name: &str, score: f64) -> Result<()> {
        let enrollment = self
            .enrollment_mut(course_name)
            .ok_or_else(|| RegisterError::NotEnrolled {
                course: course_name.to_string(),
            })?;
        enrollment.score = Some(score);
        Ok(())
    }
}
