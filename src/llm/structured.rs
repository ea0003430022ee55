//! Structured output: ask the model for JSON matching a schema, then check
//! the raw reply locally. A reply that does not validate is a hard error.

use super::traits::ModelClient;
use super::types::{CompletionRequest, ResponseFormat};
use crate::error::{Result, WorkflowError};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A type the model can be asked to produce.
///
/// Deserialization covers shape and enumerations; `validate` adds rules the
/// schema cannot express.
pub trait StructuredOutput: DeserializeOwned + JsonSchema {
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// JSON schema for `T` as sent in `response_format`.
pub fn schema_for<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({"type": "object"}))
}

/// Decode a raw model reply into `T`. Surrounding whitespace is ignored;
/// anything else that is not valid JSON for `T` is rejected.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> std::result::Result<T, WorkflowError> {
    serde_json::from_str(raw.trim()).map_err(|error| WorkflowError::InvalidStructuredOutput {
        reason: error.to_string(),
    })
}

pub fn parse_structured<T: StructuredOutput>(raw: &str) -> std::result::Result<T, WorkflowError> {
    let value: T = decode_json(raw)?;
    value
        .validate()
        .map_err(|reason| WorkflowError::InvalidStructuredOutput { reason })?;
    Ok(value)
}

/// Send `request` constrained to `T`'s schema and validate the reply.
pub async fn complete_structured<T: StructuredOutput>(
    client: &dyn ModelClient,
    request: CompletionRequest,
) -> Result<T> {
    let request = request.response_format(ResponseFormat::json_object(schema_for::<T>()));
    let result = client.complete(request).await?;
    Ok(parse_structured(&result.text)?)
}

/// Like [`complete_structured`] with a schema built at runtime, for
/// enumerations only known from configuration.
pub async fn complete_with_schema<T: DeserializeOwned>(
    client: &dyn ModelClient,
    request: CompletionRequest,
    schema: Value,
) -> Result<T> {
    let request = request.response_format(ResponseFormat::json_object(schema));
    let result = client.complete(request).await?;
    Ok(decode_json(&result.text)?)
}
