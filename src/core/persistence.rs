//! Flat-file persistence for the registry.
//!
//! The file holds one line per (student, enrollment) pair under the header
//! `FullName,Email,CourseName,CourseLevel,Score`. The dialect is deliberately
//! minimal and is not RFC 4180:
//!
//! - export wraps a field in double quotes only when it contains a comma and
//!   never escapes embedded quotes;
//! - import flips an "inside quotes" flag on every `"` and drops the quote
//!   character itself.
//!
//! Students without enrollments produce no lines and do not survive a round
//! trip.

use crate::core::registry::Registry;
use crate::domain::model::CourseLevel;
use crate::domain::ports::Storage;
use crate::domain::services::Learner;
use crate::utils::error::{RegisterError, Result};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

pub const HEADER: [&str; 5] = ["FullName", "Email", "CourseName", "CourseLevel", "Score"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRow {
    full_name: String,
    email: String,
    course_name: String,
    course_level: CourseLevel,
    score: String,
}

/// One parsed data line of the persistence file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub full_name: String,
    pub email: String,
    pub course_name: String,
    pub level: CourseLevel,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub rows_applied: usize,
    pub rows_skipped: usize,
    pub students: usize,
    pub courses_added: usize,
}

pub fn escape_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Splits one line into fields, toggling quote mode on every `"`.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Empty or unparsable scores are unset, as are values outside `[0, 100]`.
fn parse_stored_score(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && (0.0..=100.0).contains(s))
}

/// Parses a data line. Returns `None` for lines that cannot describe an enrollment.
pub fn parse_row(line: &str) -> Option<ImportRow> {
    let fields = split_line(line);
    if fields.len() < HEADER.len() {
        return None;
    }
    if fields[1].trim().is_empty() || fields[2].trim().is_empty() {
        return None;
    }

    Some(ImportRow {
        full_name: fields[0].clone(),
        email: fields[1].clone(),
        course_name: fields[2].clone(),
        level: CourseLevel::parse_or_lowest(&fields[3]),
        score: parse_stored_score(&fields[4]),
    })
}

/// Renders the registry in the persistence format. Returns the text and the
/// number of data lines written.
pub fn export_to_string(registry: &Registry) -> Result<(String, usize)> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    let mut lines = 0;
    for student in registry.students() {
        for enrollment in student.enrollments() {
            writer.serialize(ExportRow {
                full_name: escape_field(student.full_name()),
                email: escape_field(student.email()),
                course_name: escape_field(enrollment.course().name()),
                course_level: enrollment.course().level(),
                score: enrollment.score_text().unwrap_or_default(),
            })?;
            lines += 1;
        }
    }

    let data = writer
        .into_inner()
        .map_err(|e| RegisterError::IoError(e.into_error()))?;
    let text = String::from_utf8(data).map_err(|e| RegisterError::Internal {
        message: format!("export produced invalid UTF-8: {}", e),
    })?;
    Ok((text, lines))
}

pub fn export(registry: &Registry, storage: &impl Storage, path: &str) -> Result<usize> {
    let (text, lines) = export_to_string(registry)?;
    let skipped = registry
        .students()
        .iter()
        .filter(|s| s.enrollments().is_empty())
        .count();
    if skipped > 0 {
        tracing::warn!("{} student(s) without enrollments are not exported", skipped);
    }

    storage.write_file(path, text.as_bytes())?;
    tracing::info!("Exported {} line(s) to {}", lines, path);
    Ok(lines)
}

/// Parses every data line after the header. Returns the rows and the count of
/// skipped lines.
pub fn parse_document(text: &str) -> (Vec<ImportRow>, usize) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut skipped = 0;

    for line in text.lines().skip(1) {
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!("Skipping malformed line: {}", line);
                }
                skipped += 1;
            }
        }
    }
    (rows, skipped)
}

/// Replaces all students with the rows in `text`. Courses are merged by name.
pub fn import_from_str(registry: &mut Registry, text: &str) -> Result<ImportSummary> {
    let (rows, rows_skipped) = parse_document(text);
    let courses_before = registry.courses().len();

    registry.clear_students();
    for row in &rows {
        let course = registry.find_or_add_course(&row.course_name, row.level);
        let student = registry.find_or_add_student(&row.full_name, &row.email);
        if student.enrollment(course.name()).is_none() {
            student.register_course(&course)?;
        }
        if let Some(score) = row.score {
            student.take_exam(course.name(), score)?;
        }
    }

    Ok(ImportSummary {
        rows_applied: rows.len(),
        rows_skipped,
        students: registry.students().len(),
        courses_added: registry.courses().len() - courses_before,
    })
}

/// Reads `path` from storage and imports it. The registry is untouched when
/// the file is missing or unreadable.
pub fn import(registry: &mut Registry, storage: &impl Storage, path: &str) -> Result<ImportSummary> {
    if !storage.exists(path) {
        return Err(RegisterError::DataFileMissing {
            path: path.to_string(),
        });
    }

    let data = storage.read_file(path)?;
    let text = String::from_utf8(data).map_err(|e| {
        RegisterError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let summary = import_from_str(registry, &text)?;
    tracing::info!(
        "Imported {} row(s) from {} ({} skipped, {} student(s), {} new course(s))",
        summary.rows_applied,
        path,
        summary.rows_skipped,
        summary.students,
        summary.courses_added
    );
    Ok(summary)
}
