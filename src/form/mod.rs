//! Questionnaire form
//!
//! Field table, raw form state and validation into typed answers.

pub mod answers;
pub mod fields;
pub mod state;

pub use answers::{AcademicPerformance, Answers};
pub use fields::{field, FieldKind, FieldSpec, FIELDS, FIELD_COUNT};
pub use state::FormState;
