//! Fake student generation for development databases.

use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use rayon::prelude::*;
use registrar_db::{StoreError, StudentStore};
use registrar_models::{Course, CreateStudentDto, NewStudent};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    /// Records rejected because a unique field was already taken.
    pub skipped: usize,
}

/// Builds one fake student. `batch` keeps codes, emails and phones distinct
/// across seeding runs; `index` keeps them distinct within one.
pub fn generate_student(batch: u32, index: usize) -> CreateStudentDto {
    let mut rng = rand::thread_rng();

    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let local_part: String = format!("{}.{}", first_name, last_name)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();

    let course = Course::ALL[rng.gen_range(0..Course::ALL.len())];
    // Two decimals, like a transcript.
    let gpa = (rng.gen_range(0.0..=10.0_f64) * 100.0).round() / 100.0;

    let address = rng.gen_bool(0.8).then(|| {
        let street: String = StreetName().fake();
        let city: String = CityName().fake();
        format!("{} {}, {}", rng.gen_range(1..999), street, city)
    });

    CreateStudentDto {
        student_id: format!("STU{:04}{:05}", batch, index),
        first_name,
        last_name,
        email: format!("{}.{:04}{:05}@example.edu", local_part, batch, index),
        phone: format!("9{:04}{:05}", batch, index),
        course: course.to_string(),
        year: Some(rng.gen_range(1..=4)),
        gpa: Some(gpa),
        address,
    }
}

/// Generates `count` valid students in parallel.
pub fn generate_students(count: usize) -> Vec<NewStudent> {
    let batch = rand::thread_rng().gen_range(0..10_000);

    (0..count)
        .into_par_iter()
        .map(|index| generate_student(batch, index))
        .filter(|dto| dto.validate().is_ok())
        .filter_map(|dto| NewStudent::try_from(dto).ok())
        .collect()
}

/// Inserts `count` fake students, skipping any that collide with existing
/// records.
pub async fn seed_students(
    students: &dyn StudentStore,
    count: usize,
) -> Result<SeedReport, StoreError> {
    let start = Instant::now();
    let mut report = SeedReport::default();

    for student in generate_students(count) {
        match students.create(student).await {
            Ok(_) => report.created += 1,
            Err(StoreError::DuplicateKey { .. }) => report.skipped += 1,
            Err(e) => return Err(e),
        }
    }

    println!(
        "   Inserted {} students in {:?}",
        report.created,
        start.elapsed()
    );

    Ok(report)
}
