//! Component module - runtime component instances and the tree that owns them.
//!
//! Field types are variants of one `ComponentInstance` type; validation is a
//! shared function applied to every value-holding variant.

mod instance;
mod tree;
mod validity;

pub use instance::{ComponentInstance, ComponentVariant, InputKind};
pub use tree::{BuiltTree, ComponentTree};
pub use validity::{validate_value, FieldError, FieldValidator, ValidationRule};
