//! Form loader serving a schema held in memory.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::schema::FormSchema;
use crate::ports::FormLoader;

/// Serves a fixed schema, or a fixed failure.
#[derive(Debug, Clone)]
pub struct StaticFormLoader {
    result: Result<FormSchema, DomainError>,
}

impl StaticFormLoader {
    pub fn new(schema: FormSchema) -> Self {
        Self { result: Ok(schema) }
    }

    /// Parses `value` as a form definition.
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        let schema = serde_json::from_value(value).map_err(|e| {
            DomainError::new(ErrorCode::SchemaLoadFailed, format!("Invalid form: {}", e))
        })?;
        Ok(Self::new(schema))
    }

    /// A loader whose every call fails with `error`.
    pub fn failing(error: DomainError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl FormLoader for StaticFormLoader {
    async fn load_form(&self) -> Result<FormSchema, DomainError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn serves_parsed_schema() {
        let loader = StaticFormLoader::from_json(json!({
            "components": [{"type": "panel", "key": "only"}]
        }))
        .unwrap();
        assert_eq!(loader.load_form().await.unwrap().components[0].key, "only");
    }

    #[tokio::test]
    async fn failing_loader_returns_its_error() {
        let loader = StaticFormLoader::failing(DomainError::new(ErrorCode::SchemaLoadFailed, "offline"));
        assert_eq!(loader.load_form().await.unwrap_err().message, "offline");
    }

    #[test]
    fn rejects_non_object_forms() {
        assert!(StaticFormLoader::from_json(json!([1, 2])).is_err());
    }
}
