//! # Registrar CLI
//!
//! Administrative tools for the Registrar API.
//!
//! - [`admin`]: create admin accounts, the only way to obtain the `admin` role
//! - [`seeder`]: fill the student directory with fake records
//!
//! ## Usage
//!
//! ```ignore
//! use registrar_cli::seeder::seed_students;
//!
//! let report = seed_students(&store, 50).await?;
//! ```

pub mod admin;
pub mod seeder;
