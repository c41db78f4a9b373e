//! Pure check functions, one module per concern.

pub mod file;
pub mod selection;
pub mod text;
