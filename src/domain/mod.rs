//! Domain layer containing the wizard engine and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, lifecycle status, events, errors)
//! - `schema` - Form definition nodes as loaded from JSON or YAML
//! - `submission` - The submission data object shared by every component
//! - `condition` - Visibility conditions and `nextPage` expressions
//! - `component` - Component instances, the component tree and field validation
//! - `wizard` - Page flow: navigation, pages, validity and button policy
//!
//! Nothing in here performs I/O; collaborators are reached through `ports`.

pub mod component;
pub mod condition;
pub mod foundation;
pub mod schema;
pub mod submission;
pub mod wizard;
