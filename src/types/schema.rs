//! Output schema capability.
//!
//! The ask pipeline depends only on [`OutputSchema`]: one method describes
//! the expected shape as JSON Schema (sent to the endpoint as a strict
//! response format), the other validates a parsed value locally. Both
//! implementations here validate against the exact JSON Schema they describe,
//! so the endpoint and the local check accept the same set of values.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AtomError;

/// Reasons a value failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AtomError {
    fn from(err: ValidationError) -> Self {
        AtomError::MalformedResponse(format!("Schema validation failed: {err}"))
    }
}

/// A structural contract the answer must satisfy.
pub trait OutputSchema<T>: Send + Sync {
    /// JSON Schema describing accepted values.
    fn describe(&self) -> Value;

    /// Validate (and convert) a parsed JSON value.
    fn validate(&self, value: Value) -> Result<T, ValidationError>;

    /// Name sent alongside the schema in the response format.
    fn name(&self) -> &str {
        "response"
    }
}

/// Untyped JSON Schema output, backed by the `jsonschema` crate.
///
/// ```rust,ignore
/// use brains_xai::types::JsonSchemaOutput;
/// use serde_json::json;
///
/// let schema = JsonSchemaOutput::new(json!({
///     "type": "object",
///     "properties": { "content": { "type": "string" } },
///     "required": ["content"],
///     "additionalProperties": false
/// }))?;
/// ```
pub struct JsonSchemaOutput {
    schema: Value,
    validator: jsonschema::Validator,
    name: String,
}

impl JsonSchemaOutput {
    /// Compile the schema once; an invalid schema is a configuration error.
    pub fn new(schema: Value) -> Result<Self, AtomError> {
        let validator = jsonschema::validator_for(&schema).map_err(|e| {
            AtomError::ConfigurationError(format!("Invalid JSON Schema: {e}"))
        })?;
        Ok(Self {
            schema,
            validator,
            name: "response".to_string(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if self.validator.is_valid(value) {
            return Ok(());
        }
        let mut messages = Vec::new();
        for err in self.validator.iter_errors(value) {
            messages.push(format!("{} at {}", err, err.instance_path));
            if messages.len() >= 3 {
                break;
            }
        }
        Err(ValidationError { messages })
    }
}

impl fmt::Debug for JsonSchemaOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaOutput")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish()
    }
}

impl OutputSchema<Value> for JsonSchemaOutput {
    fn describe(&self) -> Value {
        self.schema.clone()
    }

    fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        self.check(&value)?;
        Ok(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Typed output: JSON Schema validation followed by serde deserialization.
///
/// The schema must describe the same shape `T` deserializes from; the schema
/// is the contract, `T` is the convenience.
pub struct TypedOutput<T> {
    inner: JsonSchemaOutput,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> TypedOutput<T> {
    pub fn new(schema: Value) -> Result<Self, AtomError> {
        Ok(Self {
            inner: JsonSchemaOutput::new(schema)?,
            _marker: PhantomData,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.with_name(name);
        self
    }
}

impl<T: DeserializeOwned> OutputSchema<T> for TypedOutput<T> {
    fn describe(&self) -> Value {
        self.inner.describe()
    }

    fn validate(&self, value: Value) -> Result<T, ValidationError> {
        self.inner.check(&value)?;
        serde_json::from_value(value).map_err(|e| ValidationError::new(e.to_string()))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// `{ "content": string }`, the shape most briefs-driven asks use.
pub fn content_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "content": { "type": "string" }
        },
        "required": ["content"],
        "additionalProperties": false
    })
}
