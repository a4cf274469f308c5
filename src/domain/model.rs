use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub const ALL: [CourseLevel; 3] = [
        CourseLevel::Beginner,
        CourseLevel::Intermediate,
        CourseLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }

    /// Parses a level by exact name or by ordinal (`0`..=`2`).
    /// Anything else yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(level) = Self::ALL.iter().find(|l| l.as_str() == value) {
            return Some(*level);
        }
        value
            .parse::<usize>()
            .ok()
            .and_then(|ordinal| Self::ALL.get(ordinal).copied())
    }

    /// Lenient parse used by import: unknown or missing names fall back to `Beginner`.
    pub fn parse_or_lowest(value: &str) -> Self {
        Self::parse(value).unwrap_or(CourseLevel::Beginner)
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub full_name: String,
    pub email: String,
}

impl Person {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Case-insensitive email comparison; email is the identity key.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// Catalog entry. Immutable once created; `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    name: String,
    level: CourseLevel,
}

impl Course {
    pub fn new(name: impl Into<String>, level: CourseLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> CourseLevel {
        self.level
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    Average,
    Weak,
    Ungraded,
}

impl Grade {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Grade::Ungraded,
            Some(s) if s >= 85.0 => Grade::Excellent,
            Some(s) if s >= 70.0 => Grade::Good,
            Some(s) if s >= 50.0 => Grade::Average,
            Some(_) => Grade::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Good => "good",
            Grade::Average => "average",
            Grade::Weak => "weak",
            Grade::Ungraded => "no grade yet",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A student's seat in one course. `score` is `None` until an exam is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    course: Course,
    pub score: Option<f64>,
}

impl Enrollment {
    pub fn new(course: Course) -> Self {
        Self {
            course,
            score: None,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn classify(&self) -> Grade {
        Grade::from_score(self.score)
    }

    /// Score as written to screen and file: `90` for whole numbers, `72.5` otherwise.
    pub fn score_text(&self) -> Option<String> {
        self.score.map(|s| s.to_string())
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Level: {} - Score: {} - Grade: {}",
            self.course.name(),
            self.course.level(),
            self.score_text().unwrap_or_else(|| "not entered".to_string()),
            self.classify()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    person: Person,
    enrollments: Vec<Enrollment>,
}

impl Student {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            person: Person::new(full_name, email),
            enrollments: Vec::new(),
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn full_name(&self) -> &str {
        &self.person.full_name
    }

    pub fn email(&self) -> &str {
        &self.person.email
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn enrollment(&self, course_name: &str) -> Option<&Enrollment> {
        self.enrollments
            .iter()
            .find(|e| e.course().name() == course_name)
    }

    pub(crate) fn enrollment_mut(&mut self, course_name: &str) -> Option<&mut Enrollment> {
        self.enrollments
            .iter_mut()
            .find(|e| e.course().name() == course_name)
    }

    pub(crate) fn push_enrollment(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    /// Header line followed by one indented line per enrollment.
    pub fn display_info(&self) -> String {
        let mut out = format!(
            "Name: {}, Email: {}, Courses enrolled: {}",
            self.full_name(),
            self.email(),
            self.enrollments.len()
        );
        for enrollment in &self.enrollments {
            out.push_str("\n  - ");
            out.push_str(&enrollment.to_string());
        }
        out
    }
}
