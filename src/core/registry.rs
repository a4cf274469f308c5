use crate::domain::model::{Course, CourseLevel, Student};
use crate::utils::error::{RegisterError, Result};

/// Built-in catalog used when no configuration overrides it.
pub fn default_catalog() -> Vec<Course> {
    vec![
        Course::new("C# Co ban", CourseLevel::Beginner),
        Course::new("Lap trinh web", CourseLevel::Intermediate),
        Course::new("Lap trinh nang cao", CourseLevel::Advanced),
    ]
}

/// All students and courses of one run. Lookups are linear scans.
///
/// Students are keyed by email (case-insensitive) and courses by name; the
/// registry only grows, except when import replaces the student list.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: Vec<Student>,
    courses: Vec<Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(courses: Vec<Course>) -> Self {
        let mut registry = Self::new();
        for course in courses {
            registry.find_or_add_course(course.name(), course.level());
        }
        registry
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn add_student(&mut self, full_name: &str, email: &str) -> Result<&Student> {
        let full_name = full_name.trim();
        let email = email.trim();
        if full_name.is_empty() || email.is_empty() {
            return Err(RegisterError::validation(
                "Name and email must not be empty.",
            ));
        }
        if self.find_student_by_email(email).is_some() {
            return Err(RegisterError::DuplicateStudent {
                email: email.to_string(),
            });
        }

        self.students.push(Student::new(full_name, email));
        tracing::info!("Added student {}", email);
        self.students
            .last()
            .ok_or_else(|| RegisterError::Internal {
                message: "student vanished after insert".to_string(),
            })
    }

    pub fn find_student_by_email(&self, email: &str) -> Option<&Student> {
        let email = email.trim();
        self.students.iter().find(|s| s.person().has_email(email))
    }

    pub fn find_student_by_email_mut(&mut self, email: &str) -> Option<&mut Student> {
        let email = email.trim();
        self.students.iter_mut().find(|s| s.person().has_email(email))
    }

    pub fn find_course(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name() == name)
    }

    /// 0-based access to the numbered catalog shown to the operator.
    pub fn course_by_index(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    /// Returns the existing course with this name, or appends one at `level`.
    /// An existing course keeps its own level.
    pub fn find_or_add_course(&mut self, name: &str, level: CourseLevel) -> Course {
        if let Some(course) = self.find_course(name) {
            return course.clone();
        }
        let course = Course::new(name, level);
        self.courses.push(course.clone());
        tracing::debug!("Added course {}", course);
        course
    }

    pub(crate) fn find_or_add_student(&mut self, full_name: &str, email: &str) -> &mut Student {
        let position = self.students.iter().position(|s| s.person().has_email(email));
        let index = match position {
            Some(index) => index,
            None => {
                self.students.push(Student::new(full_name, email));
                self.students.len() - 1
            }
        };
        &mut self.students[index]
    }

    /// Drops every student. Courses are kept.
    pub fn clear_students(&mut self) {
        self.students.clear();
    }
}
