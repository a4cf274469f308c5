//! Interactive menu loop.
//!
//! One operator action runs to completion before the menu is shown again.
//! Every failure inside an action is rendered to the operator and the loop
//! continues; only `Exit` or the end of the input stream stops it. Registry
//! mutation happens only after all inputs of an action have been validated.

use crate::core::persistence;
use crate::core::registry::Registry;
use crate::domain::ports::Storage;
use crate::domain::services::Learner;
use crate::utils::error::{RegisterError, Result};
use crate::utils::validation::{parse_score, parse_selection};
use std::io::{BufRead, Write};

const MENU: &str = "\n--- MAIN MENU ---\n\
1. Add student\n\
2. Enroll in course\n\
3. Record score\n\
4. List students\n\
5. Export to file\n\
6. Import from file\n\
7. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddStudent,
    Enroll,
    RecordScore,
    ListStudents,
    Export,
    Import,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddStudent),
            "2" => Some(Self::Enroll),
            "3" => Some(Self::RecordScore),
            "4" => Some(Self::ListStudents),
            "5" => Some(Self::Export),
            "6" => Some(Self::Import),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Console<S: Storage, R: BufRead, W: Write> {
    storage: S,
    data_file: String,
    input: R,
    output: W,
}

impl<S: Storage, R: BufRead, W: Write> Console<S, R, W> {
    pub fn new(storage: S, data_file: impl Into<String>, input: R, output: W) -> Self {
        Self {
            storage,
            data_file: data_file.into(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until `Exit` or end of input. Only a failure to write to
    /// the operator's output ends the loop with an error.
    pub fn run(&mut self, registry: &mut Registry) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.read_line("Choose an option: ")? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };
            writeln!(self.output)?;

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                break;
            }

            tracing::debug!("Dispatching {:?}", choice);
            if let Err(e) = self.dispatch(choice, registry) {
                tracing::warn!("{:?} aborted ({:?}): {}", choice, e.category(), e);
                writeln!(self.output, "{}", e.user_friendly_message())?;
            }
        }
        Ok(())
    }

    pub fn dispatch(&mut self, choice: MenuChoice, registry: &mut Registry) -> Result<()> {
        match choice {
            MenuChoice::AddStudent => self.add_student(registry),
            MenuChoice::Enroll => self.enroll(registry),
            MenuChoice::RecordScore => self.record_score(registry),
            MenuChoice::ListStudents => self.list_students(registry),
            MenuChoice::Export => self.export(registry),
            MenuChoice::Import => self.import(registry),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Invalid UTF-8 decodes to U+FFFD and fails parsing like any bad entry.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?
            .ok_or_else(|| RegisterError::validation("Input ended."))
    }

    fn add_student(&mut self, registry: &mut Registry) -> Result<()> {
        let name = self.prompt("Enter student name: ")?;
        let email = self.prompt("Enter student email: ")?;

        registry.add_student(&name, &email)?;
        writeln!(self.output, "Student added.")?;
        Ok(())
    }

    /// Reads an email and checks it names a student. Returns the email as typed.
    fn resolve_student(&mut self, registry: &Registry) -> Result<String> {
        let email = self.prompt("Enter student email: ")?;
        if registry.find_student_by_email(&email).is_none() {
            return Err(RegisterError::StudentNotFound { email });
        }
        Ok(email)
    }

    fn enroll(&mut self, registry: &mut Registry) -> Result<()> {
        let email = self.resolve_student(registry)?;

        writeln!(self.output, "Courses:")?;
        for (i, course) in registry.courses().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, course)?;
        }
        let selection = self.prompt("Choose a course (number): ")?;
        let index = parse_selection(&selection, registry.courses().len())?;
        let course = registry
            .course_by_index(index)
            .cloned()
            .ok_or_else(|| RegisterError::InvalidSelection {
                input: selection.clone(),
                max: registry.courses().len(),
            })?;

        let student = registry
            .find_student_by_email_mut(&email)
            .ok_or_else(|| RegisterError::StudentNotFound {
                email: email.clone(),
            })?;
        student.register_course(&course)?;
        tracing::info!("{} enrolled in {}", student.email(), course.name());
        writeln!(self.output, "Enrolled in {}.", course.name())?;
        Ok(())
    }

    fn record_score(&mut self, registry: &mut Registry) -> Result<()> {
        let email = self.resolve_student(registry)?;
        let course_names: Vec<String> = registry
            .find_student_by_email(&email)
            .map(|s| {
                s.enrollments()
                    .iter()
                    .map(|e| e.course().name().to_string())
                    .collect()
            })
            .unwrap_or_default();
        if course_names.is_empty() {
            return Err(RegisterError::validation(
                "This student has no enrollments.",
            ));
        }

        writeln!(self.output, "Enrolled courses:")?;
        for (i, name) in course_names.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, name)?;
        }
        let selection = self.prompt("Choose a course to score (number): ")?;
        let course_name = &course_names[parse_selection(&selection, course_names.len())?];
        let score = parse_score(&self.prompt("Enter score (0-100): ")?)?;

        let student = registry
            .find_student_by_email_mut(&email)
            .ok_or_else(|| RegisterError::StudentNotFound {
                email: email.clone(),
            })?;
        student.take_exam(course_name, score)?;
        tracing::info!("Recorded {} for {} in {}", score, student.email(), course_name);
        writeln!(self.output, "Recorded score {} for {}.", score, course_name)?;
        Ok(())
    }

    fn list_students(&mut self, registry: &Registry) -> Result<()> {
        if registry.students().is_empty() {
            writeln!(self.output, "No students yet.")?;
            return Ok(());
        }
        for student in registry.students() {
            writeln!(self.output, "{}\n", student.display_info())?;
        }
        Ok(())
    }

    fn export(&mut self, registry: &Registry) -> Result<()> {
        let lines = persistence::export(registry, &self.storage, &self.data_file)?;
        writeln!(
            self.output,
            "Exported {} line(s) to {}.",
            lines, self.data_file
        )?;
        Ok(())
    }

    fn import(&mut self, registry: &mut Registry) -> Result<()> {
        let summary = persistence::import(registry, &self.storage, &self.data_file)?;
        writeln!(
            self.output,
            "Imported {} row(s) from {} ({} skipped).",
            summary.rows_applied, self.data_file, summary.rows_skipped
        )?;
        Ok(())
    }
}
