use course_register::core::persistence;
use course_register::core::registry::default_catalog;
use course_register::{Console, Learner, LocalStorage, Registry};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn run_session(storage: &LocalStorage, registry: &mut Registry, script: &str) -> String {
    let mut console = Console::new(storage.clone(), "students.csv", script.as_bytes(), Vec::new());
    console.run(registry).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

fn triples(registry: &Registry) -> BTreeSet<(String, String, Option<String>)> {
    registry
        .students()
        .iter()
        .flat_map(|s| {
            s.enrollments().iter().map(move |e| {
                (
                    s.email().to_lowercase(),
                    e.course().name().to_string(),
                    e.score_text(),
                )
            })
        })
        .collect()
}

#[test]
fn test_reference_example_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let mut registry = Registry::with_catalog(default_catalog());

    run_session(
        &storage,
        &mut registry,
        "1\nAlice\na@x.com\n2\na@x.com\n1\n3\na@x.com\n1\n90\n5\n7\n",
    );

    let content = std::fs::read_to_string(temp_dir.path().join("students.csv")).unwrap();
    assert_eq!(
        content,
        "FullName,Email,CourseName,CourseLevel,Score\nAlice,a@x.com,C# Co ban,Beginner,90\n"
    );

    let mut restored = Registry::with_catalog(default_catalog());
    let output = run_session(&storage, &mut restored, "6\n4\n7\n");

    assert_eq!(restored.students().len(), 1);
    let alice = &restored.students()[0];
    assert_eq!(alice.enrollments().len(), 1);
    assert_eq!(alice.enrollments()[0].score, Some(90.0));
    assert_eq!(alice.enrollments()[0].classify().label(), "excellent");
    assert!(output.contains("Score: 90 - Grade: excellent"));
}

#[test]
fn test_round_trip_preserves_triples_and_drops_unenrolled_students() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let mut registry = Registry::with_catalog(default_catalog());

    registry.add_student("Alice", "a@x.com").unwrap();
    registry.add_student("Nguyen, Binh", "binh@x.com").unwrap();
    registry.add_student("Chi", "chi@x.com").unwrap();
    let courses = registry.courses().to_vec();

    let alice = registry.find_student_by_email_mut("a@x.com").unwrap();
    alice.register_course(&courses[0]).unwrap();
    alice.register_course(&courses[2]).unwrap();
    alice.take_exam(courses[2].name(), 49.5).unwrap();

    let binh = registry.find_student_by_email_mut("binh@x.com").unwrap();
    binh.register_course(&courses[1]).unwrap();
    binh.take_exam(courses[1].name(), 70.0).unwrap();

    let before = triples(&registry);
    assert_eq!(persistence::export(&registry, &storage, "students.csv").unwrap(), 3);

    registry.clear_students();
    let summary = persistence::import(&mut registry, &storage, "students.csv").unwrap();

    assert_eq!(summary.rows_applied, 3);
    assert_eq!(triples(&registry), before);
    assert_eq!(registry.students().len(), 2);
    assert!(registry.find_student_by_email("chi@x.com").is_none());
    assert_eq!(
        registry.find_student_by_email("binh@x.com").unwrap().full_name(),
        "Nguyen, Binh"
    );
}

#[test]
fn test_import_creates_unknown_courses_with_recorded_level() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("students.csv"),
        "FullName,Email,CourseName,CourseLevel,Score\n\
         Dao,dao@x.com,Rust,Advanced,88\n\
         Dao,dao@x.com,Go,Nonsense,\n",
    )
    .unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let mut registry = Registry::with_catalog(default_catalog());

    let output = run_session(&storage, &mut registry, "6\n2\ndao@x.com\n4\n7\n");

    assert!(output.contains("Imported 2 row(s)"));
    assert_eq!(registry.courses().len(), 5);
    assert!(output.contains("4. Rust (Advanced)"));
    assert!(output.contains("5. Go (Beginner)"));
    assert_eq!(registry.students()[0].enrollments().len(), 2);
}

#[test]
fn test_export_to_unwritable_location_reports_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("students.csv")).unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let mut registry = Registry::with_catalog(default_catalog());
    registry.add_student("Alice", "a@x.com").unwrap();

    let output = run_session(&storage, &mut registry, "5\n4\n7\n");

    assert!(output.contains("File error:"));
    assert!(output.contains("Name: Alice"));
    assert_eq!(registry.students().len(), 1);
}

#[test]
fn test_failed_import_keeps_students() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let mut registry = Registry::with_catalog(default_catalog());
    registry.add_student("Alice", "a@x.com").unwrap();

    let output = run_session(&storage, &mut registry, "6\n7\n");

    assert!(output.contains("File students.csv does not exist."));
    assert_eq!(registry.students().len(), 1);
}
