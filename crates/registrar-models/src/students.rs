//! Student domain models and DTOs.
//!
//! This module contains the student record as stored and returned by the API,
//! the write DTOs with their validation rules, and the list query.
//!
//! # Year bounds
//!
//! The `students` table accepts `year` values 0-4, but both write paths
//! (create and update) only accept 1-4. A stored 0 can therefore only come
//! from outside the API.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use registrar_core::pagination::{PaginationParams, deserialize_lenient_i64};
use registrar_core::serde::{trim_optional_string, trim_string};

use crate::ids::StudentId;
use crate::normalize_email;

/// Smallest `year` the write paths accept.
pub const MIN_YEAR: i32 = 1;
/// Largest `year` any path accepts.
pub const MAX_YEAR: i32 = 4;
pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 10.0;

/// Courses a student can be enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Course {
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "ECE")]
    Ece,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Mechanical,
    Civil,
    Biotech,
}

impl Course {
    pub const ALL: [Course; 6] = [
        Course::It,
        Course::Ece,
        Course::ComputerScience,
        Course::Mechanical,
        Course::Civil,
        Course::Biotech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::It => "IT",
            Course::Ece => "ECE",
            Course::ComputerScience => "Computer Science",
            Course::Mechanical => "Mechanical",
            Course::Civil => "Civil",
            Course::Biotech => "Biotech",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown course: {0}")]
pub struct UnknownCourse(pub String);

impl FromStr for Course {
    type Err = UnknownCourse;

    /// Exact match against the display names; `"it"` is not `"IT"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|course| course.as_str() == s)
            .ok_or_else(|| UnknownCourse(s.to_string()))
    }
}

impl TryFrom<String> for Course {
    type Error = UnknownCourse;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn validate_course(course: &str) -> Result<(), ValidationError> {
    if course.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Borrowed("Course is required"));
        return Err(error);
    }

    course.parse::<Course>().map(|_| ()).map_err(|_| {
        let allowed = Course::ALL
            .iter()
            .map(Course::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let mut error = ValidationError::new("course");
        error.message = Some(Cow::Owned(format!("Course must be one of: {}", allowed)));
        error
    })
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    /// Institution-assigned code, unique.
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[sqlx(try_from = "String")]
    pub course: Course,
    pub year: i32,
    pub gpa: f64,
    pub address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a student.
///
/// Every field except `address` is required. Missing strings deserialize to
/// empty and are reported by validation, so a caller sees all problems at once.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Student ID is required"))]
    pub student_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
    #[serde(default, deserialize_with = "trim_string")]
    #[validate(email(message = "Valid Email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "validate_course"))]
    #[schema(example = "Computer Science")]
    pub course: String,
    #[validate(
        required(message = "Year must be between 1 and 4"),
        range(min = 1, max = 4, message = "Year must be between 1 and 4")
    )]
    pub year: Option<i32>,
    #[validate(
        required(message = "GPA must be between 0 and 10"),
        range(min = 0.0, max = 10.0, message = "GPA must be between 0 and 10")
    )]
    pub gpa: Option<f64>,
    pub address: Option<String>,
}

/// DTO for updating a student.
///
/// All fields are optional; only provided fields are validated and changed.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "Student ID cannot be empty"))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, message = "First Name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last Name cannot be empty"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "trim_optional_string")]
    #[validate(email(message = "Valid Email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone cannot be empty"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_course"))]
    pub course: Option<String>,
    #[validate(range(min = 1, max = 4, message = "Year must be between 1 and 4"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, max = 10.0, message = "GPA must be between 0 and 10"))]
    pub gpa: Option<f64>,
    pub address: Option<String>,
}

/// A validated student ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub course: Course,
    pub year: i32,
    pub gpa: f64,
    pub address: Option<String>,
}

impl TryFrom<CreateStudentDto> for NewStudent {
    type Error = UnknownCourse;

    /// Assumes the DTO has been validated; `year` and `gpa` fall back to the
    /// lowest accepted values only if it hasn't.
    fn try_from(dto: CreateStudentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            course: dto.course.parse()?,
            student_id: dto.student_id.trim().to_string(),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: normalize_email(&dto.email),
            phone: dto.phone.trim().to_string(),
            year: dto.year.unwrap_or(MIN_YEAR),
            gpa: dto.gpa.unwrap_or(MIN_GPA),
            address: dto.address,
        })
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentChanges {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub course: Option<Course>,
    pub year: Option<i32>,
    pub gpa: Option<f64>,
    pub address: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        *self == StudentChanges::default()
    }

    /// Applies the changes to a record in place. `updated_at` is left to the caller.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(student_id) = &self.student_id {
            student.student_id = student_id.clone();
        }
        if let Some(first_name) = &self.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            student.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            student.phone = phone.clone();
        }
        if let Some(course) = self.course {
            student.course = course;
        }
        if let Some(year) = self.year {
            student.year = year;
        }
        if let Some(gpa) = self.gpa {
            student.gpa = gpa;
        }
        if let Some(address) = &self.address {
            student.address = Some(address.clone());
        }
    }
}

impl TryFrom<UpdateStudentDto> for StudentChanges {
    type Error = UnknownCourse;

    fn try_from(dto: UpdateStudentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            course: dto.course.map(|c| c.parse()).transpose()?,
            student_id: dto.student_id.map(|s| s.trim().to_string()),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email.as_deref().map(normalize_email),
            phone: dto.phone.map(|p| p.trim().to_string()),
            year: dto.year,
            gpa: dto.gpa,
            address: dto.address,
        })
    }
}

/// Query parameters for listing students.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentQueryParams {
    /// Page number, 1-indexed (default: 1)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    /// Page size (default: 5)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
    /// Case-insensitive substring match on first or last name
    pub search: Option<String>,
    /// Exact course name
    pub course: Option<String>,
}

impl StudentQueryParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn filter(&self) -> StudentFilter {
        StudentFilter::new(self.search.as_deref(), self.course.as_deref())
    }
}

/// Store-level filter. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub course: Option<String>,
}

impl StudentFilter {
    pub fn new(search: Option<&str>, course: Option<&str>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
            course: course.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// In-process equivalent of the SQL filter.
    pub fn matches(&self, student: &Student) -> bool {
        if let Some(course) = &self.course {
            if student.course.as_str() != course {
                return false;
            }
        }

        match &self.search {
            Some(search) => {
                let needle = search.to_lowercase();
                student.first_name.to_lowercase().contains(&needle)
                    || student.last_name.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Paginated list response.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedStudentsResponse {
    /// Count of all matching students, before pagination
    pub total_students: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub students: Vec<Student>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CreateStudentResponse {
    pub success: bool,
    pub message: String,
    pub student: Student,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct UpdateStudentResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "updateStu")]
    pub update_stu: Student,
}
