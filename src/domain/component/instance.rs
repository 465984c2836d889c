//! Component instances - runtime objects bound to one schema node.

use serde_json::{json, Map, Value};

use super::validity::{FieldError, FieldValidator};
use crate::domain::condition::{ConditionEvaluator, EvalContext};
use crate::domain::foundation::ComponentId;
use crate::domain::schema::{NodeType, SchemaNode};
use crate::domain::submission::{lookup, Submission};

/// Value-holding input flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextArea,
    Email,
    Number,
    Checkbox,
    Select,
    PhoneNumber,
}

/// Behavioural variant of a component, chosen from its schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentVariant {
    /// Visible input holding a submission value.
    Input(InputKind),
    /// Invisible value holder; always rendered regardless of page.
    Hidden,
    /// Static markup, holds no value.
    Content,
    /// Owns child components (well, fieldset, nested panel).
    Container,
    /// Unrecognised type; rendered as-is, never invalid.
    Unknown,
}

impl ComponentVariant {
    /// Maps a schema type to its variant.
    pub fn for_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Textfield => ComponentVariant::Input(InputKind::Text),
            NodeType::Textarea => ComponentVariant::Input(InputKind::TextArea),
            NodeType::Email => ComponentVariant::Input(InputKind::Email),
            NodeType::Number => ComponentVariant::Input(InputKind::Number),
            NodeType::Checkbox => ComponentVariant::Input(InputKind::Checkbox),
            NodeType::Select => ComponentVariant::Input(InputKind::Select),
            NodeType::PhoneNumber => ComponentVariant::Input(InputKind::PhoneNumber),
            NodeType::Hidden => ComponentVariant::Hidden,
            NodeType::Content | NodeType::Html => ComponentVariant::Content,
            NodeType::Panel | NodeType::Well | NodeType::Fieldset => ComponentVariant::Container,
            NodeType::Unknown => ComponentVariant::Unknown,
        }
    }

    /// Returns true if the variant stores a value in the submission.
    pub fn holds_value(&self) -> bool {
        matches!(self, ComponentVariant::Input(_) | ComponentVariant::Hidden)
    }
}

/// A live component bound to exactly one schema node.
///
/// Owns its children; destroying a component destroys its descendants.
#[derive(Debug, Clone)]
pub struct ComponentInstance {
    id: ComponentId,
    schema: SchemaNode,
    variant: ComponentVariant,
    page: Option<usize>,
    children: Vec<ComponentInstance>,
    validator: FieldValidator,
    errors: Vec<FieldError>,
    visible: bool,
    attached: bool,
    destroyed: bool,
}

impl ComponentInstance {
    /// Instantiates `schema` and its descendants, tagged with `page`.
    pub fn new(schema: &SchemaNode, page: Option<usize>) -> Self {
        let variant = ComponentVariant::for_type(schema.node_type);
        let children = match variant {
            ComponentVariant::Container => schema
                .components
                .iter()
                .map(|child| ComponentInstance::new(child, page))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: ComponentId::new(),
            schema: schema.clone(),
            variant,
            page,
            children,
            validator: FieldValidator::for_node(schema),
            errors: Vec::new(),
            visible: true,
            attached: false,
            destroyed: false,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.schema.key
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn variant(&self) -> ComponentVariant {
        self.variant
    }

    /// Index of the page that owns this instance; `None` for global components.
    pub fn page(&self) -> Option<usize> {
        self.page
    }

    pub fn children(&self) -> &[ComponentInstance] {
        &self.children
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // === Validation ===

    /// Validates this component and its descendants against `data`.
    ///
    /// Every child is checked even after a failure so all errors are
    /// collected. Errors are only recorded when `dirty`.
    pub fn check_validity(&mut self, data: &Map<String, Value>, dirty: bool) -> bool {
        let ctx = EvalContext::new(self.page.unwrap_or(0), data);
        self.visible = ConditionEvaluator::is_visible(&self.schema, &ctx);
        if !self.visible {
            self.errors.clear();
            return true;
        }

        let (valid, errors) = match self.variant {
            ComponentVariant::Input(_) | ComponentVariant::Hidden => {
                let errors = self.validator.validate(
                    &self.schema,
                    lookup(data, &self.schema.key),
                    self.page,
                );
                (errors.is_empty(), errors)
            }
            ComponentVariant::Container => {
                let valid = self
                    .children
                    .iter_mut()
                    .fold(true, |valid, child| child.check_validity(data, dirty) && valid);
                (valid, Vec::new())
            }
            ComponentVariant::Content | ComponentVariant::Unknown => (true, Vec::new()),
        };

        self.errors = if dirty { errors } else { Vec::new() };
        valid
    }

    /// Errors recorded on this component and its descendants, in tree order.
    pub fn errors(&self) -> Vec<FieldError> {
        let mut errors = self.errors.clone();
        for child in &self.children {
            errors.extend(child.errors());
        }
        errors
    }

    // === Data ===

    /// Restores the default value (or removes the value) in `submission`.
    pub fn reset_value(&self, submission: &mut Submission) {
        if self.variant.holds_value() {
            match &self.schema.default_value {
                Some(default) => submission.set(&self.schema.key, default.clone()),
                None => {
                    submission.remove(&self.schema.key);
                }
            }
        }
        for child in &self.children {
            child.reset_value(submission);
        }
    }

    /// Writes the default value when the submission has none yet.
    pub fn apply_default(&self, submission: &mut Submission) {
        if self.variant.holds_value() && submission.get(&self.schema.key).is_none() {
            if let Some(default) = &self.schema.default_value {
                submission.set(&self.schema.key, default.clone());
            }
        }
        for child in &self.children {
            child.apply_default(submission);
        }
    }

    // === Rendering ===

    /// Template name this component renders with.
    pub fn template_name(&self) -> &'static str {
        self.schema.node_type.template_name()
    }

    /// Context handed to the template renderer.
    pub fn render_context(&self, data: &Map<String, Value>, disabled: bool) -> Value {
        json!({
            "id": self.id.to_string(),
            "key": self.schema.key,
            "type": self.schema.node_type,
            "label": self.schema.label.as_deref().or(self.schema.title.as_deref()),
            "value": lookup(data, &self.schema.key).cloned().unwrap_or(Value::Null),
            "hidden": self.schema.hidden || !self.visible,
            "disabled": disabled || self.schema.disabled,
            "errors": self.errors.iter().map(|e| e.message.clone()).collect::<Vec<_>>(),
        })
    }

    // === Lifecycle ===

    /// Marks this component and its descendants as bound to the rendered surface.
    pub fn attach(&mut self) {
        if self.destroyed {
            return;
        }
        self.attached = true;
        for child in &mut self.children {
            child.attach();
        }
    }

    /// Releases the binding to the rendered surface.
    pub fn detach(&mut self) {
        self.attached = false;
        for child in &mut self.children {
            child.detach();
        }
    }

    /// Tears down this component and all descendants. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.detach();
        for child in &mut self.children {
            child.destroy();
        }
        self.errors.clear();
        self.destroyed = true;
    }
}
