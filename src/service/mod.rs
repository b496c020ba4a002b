//! CrudService: single-row storage operations, plus payload validation.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{TextRule, Validate, LONG_TEXT, SHORT_TEXT};
