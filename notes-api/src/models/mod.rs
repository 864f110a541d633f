pub mod error;
pub mod note;
