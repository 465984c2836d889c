//! FormLoader port - source of the form definition.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::schema::FormSchema;

/// Port for fetching a form schema before the first build.
#[async_trait]
pub trait FormLoader: Send + Sync {
    /// Loads the form definition. Failures carry `ErrorCode::SchemaLoadFailed`.
    async fn load_form(&self) -> Result<FormSchema, DomainError>;
}
