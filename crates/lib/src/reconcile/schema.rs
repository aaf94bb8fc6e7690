//! Declares the integer attributes the allocators write.

use tracing::{debug, error, info};

use super::{Context, ReconcileError};
use crate::Result;
use crate::constants::{GIDNUMBER, UIDNUMBER};
use crate::directory::{AttributeSchema, AttributeScope, AttributeType};

/// An attribute the schema must declare before any allocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredAttribute {
    pub scope: AttributeScope,
    pub name: &'static str,
    pub attribute_type: AttributeType,
}

impl RequiredAttribute {
    /// Single valued, visible, and not editable by users themselves.
    pub fn schema(&self) -> AttributeSchema {
        AttributeSchema {
            attribute_type: self.attribute_type,
            is_list: false,
            is_visible: true,
            is_editable: false,
        }
    }
}

pub const REQUIRED_ATTRIBUTES: [RequiredAttribute; 3] = [
    RequiredAttribute {
        scope: AttributeScope::User,
        name: UIDNUMBER,
        attribute_type: AttributeType::Integer,
    },
    RequiredAttribute {
        scope: AttributeScope::User,
        name: GIDNUMBER,
        attribute_type: AttributeType::Integer,
    },
    RequiredAttribute {
        scope: AttributeScope::Group,
        name: GIDNUMBER,
        attribute_type: AttributeType::Integer,
    },
];

/// Declare every attribute in [`REQUIRED_ATTRIBUTES`] the schema is missing.
///
/// Existing declarations are left alone, whatever their flags or type.
/// Returns the number of attributes created.
///
/// # Errors
/// Fails if the schema cannot be read or a declaration is rejected. Nothing
/// downstream can be written without these attributes, so both are fatal.
pub fn ensure_schema(ctx: &Context) -> Result<usize> {
    let directory = ctx.directory();
    let schema = directory.get_schema().map_err(|source| {
        error!(error = %source, "Failed to read directory schema");
        ReconcileError::SchemaUnavailable { source }
    })?;

    let mut created = 0;
    for required in REQUIRED_ATTRIBUTES {
        if schema.attributes(required.scope).contains_key(required.name) {
            debug!(scope = %required.scope, name = required.name, "Attribute already declared");
            continue;
        }

        directory
            .add_attribute(required.scope, required.name, required.schema())
            .map_err(|source| {
                error!(
                    scope = %required.scope,
                    name = required.name,
                    error = %source,
                    "Failed to create schema attribute"
                );
                ReconcileError::SchemaAttributeCreation {
                    scope: required.scope,
                    name: required.name.to_string(),
                    source,
                }
            })?;
        info!(scope = %required.scope, name = required.name, "Created schema attribute");
        created += 1;
    }

    Ok(created)
}
