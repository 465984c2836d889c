//! TemplateRenderer port - turns a named template and context into markup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::DomainError;

/// Which flavour of a template to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Form,
    Builder,
}

/// Port for the templating backend.
///
/// Rendering must be deterministic: the same name, context and mode always
/// produce the same markup.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Renders template `name` with `context`.
    ///
    /// Unknown templates are an error (`ErrorCode::RenderFailed`).
    async fn render_template(
        &self,
        name: &str,
        context: &Value,
        mode: RenderMode,
    ) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TemplateRenderer) {}

    #[test]
    fn render_mode_defaults_to_form() {
        assert_eq!(RenderMode::default(), RenderMode::Form);
        assert_eq!(serde_json::to_string(&RenderMode::Builder).unwrap(), "\"builder\"");
    }
}
