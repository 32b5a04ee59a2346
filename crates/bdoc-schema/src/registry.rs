//! Central schema registry for registry records.
//!
//! The `SchemaRegistry` builds JSON Schemas from bdoc-core types at
//! construction time using [`schemars::schema_for!`], compiles one
//! `jsonschema` validator per schema and reuses it for every request.

use std::collections::HashMap;

use bdoc_core::{CoreError, HighlightedBlock, RegistryItem};
use schemars::schema_for;
use serde_json::{Value, json};

use crate::error::SchemaError;

/// Schema name of the untrusted input record.
pub const REGISTRY_ITEM: &str = "registry_item";
/// Schema name of the pipeline's output record.
pub const HIGHLIGHTED_BLOCK: &str = "highlighted_block";

struct CompiledSchema {
    schema: Value,
    validator: jsonschema::Validator,
}

/// Named, precompiled JSON Schemas for the pipeline's input and output.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, CompiledSchema>,
}

/// Convert a `schemars` schema to a `serde_json::Value`.
macro_rules! generate {
    ($ty:ty) => {
        serde_json::to_value(schema_for!($ty)).map_err(|e| SchemaError::Generation(format!("{e}")))
    };
}

impl SchemaRegistry {
    /// Build a registry containing the `registry_item` and `highlighted_block`
    /// schemas.
    ///
    /// The output schema is tightened so that highlighted files must not
    /// carry a `content` key, even through the passthrough map.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a schema cannot be serialized or
    /// compiled.
    pub fn new() -> Result<Self, SchemaError> {
        let item = generate!(RegistryItem)?;
        let mut block = generate!(HighlightedBlock)?;
        forbid_property(&mut block, "HighlightedFile", "content")?;

        let mut schemas = HashMap::new();
        schemas.insert(REGISTRY_ITEM, compile(item)?);
        schemas.insert(HIGHLIGHTED_BLOCK, compile(block)?);
        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name).map(|compiled| &compiled.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// All validator messages are collected, not just the first.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let (schema, compiled) = self
            .schemas
            .get_key_value(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = compiled
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: *schema,
                errors,
            })
        }
    }

    /// First pass: validate an untrusted record and decode it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` for structural problems, or
    /// `SchemaError::Decode` if a structurally valid value still fails to
    /// decode.
    pub fn parse_item(&self, raw: Value) -> Result<RegistryItem, SchemaError> {
        self.validate(REGISTRY_ITEM, &raw)?;
        Ok(RegistryItem::from_value(raw)?)
    }

    /// Final pass: check the pipeline's output and return it as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` if an expected output field is
    /// missing or a file still carries `content`.
    pub fn check_block(&self, block: &HighlightedBlock) -> Result<Value, SchemaError> {
        let value = serde_json::to_value(block).map_err(CoreError::from)?;
        self.validate(HIGHLIGHTED_BLOCK, &value)?;
        Ok(value)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn compile(schema: Value) -> Result<CompiledSchema, SchemaError> {
    let validator =
        jsonschema::validator_for(&schema).map_err(|e| SchemaError::Generation(format!("{e}")))?;
    Ok(CompiledSchema { schema, validator })
}

/// Add `"not": {"required": [property]}` to a named subschema.
fn forbid_property(schema: &mut Value, definition: &str, property: &str) -> Result<(), SchemaError> {
    let defs_key = if schema.get("$defs").is_some() {
        "$defs"
    } else {
        "definitions"
    };
    let target = schema
        .get_mut(defs_key)
        .and_then(|defs| defs.get_mut(definition))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            SchemaError::Generation(format!("definition `{definition}` not found in schema"))
        })?;
    target.insert("not".to_string(), json!({ "required": [property] }));
    Ok(())
}
