//! Form schema model.
//!
//! Schema nodes are deserialized from the JSON form definition and are
//! immutable while a component tree is built from them.

mod node;

pub use node::{
    Conditional, FormSchema, LogicAction, LogicProperty, LogicRule, NodeType, PageButtonSettings,
    SchemaNode, ValidateRules,
};
