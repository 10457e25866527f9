//! Schema-driven mapping between attributed trees and domain models.
//!
//! Parsing walks a normalized [`AttributedTree`]: each child tag resolves
//! through the format's [`TagTable`], each attribute through its
//! [`AttributeTable`] with the element as context. Serialization runs the
//! same tables backwards, emitting typed attributes in declaration order.
//!
//! Per-format entry points live in the submodules; this module holds the
//! format-independent pieces they share.

pub mod curves;
pub mod dynamic;
pub mod federate;
pub mod jobs;
pub mod network;
pub mod parameters;

use cyco_core::{CycoError, CycoResult, ExportMode, LogLevel};

use crate::schema::{AttributeTable, TagTable};
use crate::tree::{is_namespace_declaration, AttributedTree};

/// What to do with an attribute that no table entry resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Keep it aside, verbatim
    Open,
    /// Reject it with [`CycoError::AttributeNotFound`]
    Closed,
}

/// Failure to store one raw value into a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Malformed(&'static str),
    /// The field does not exist on the element being built
    NotApplicable,
}

/// Route every attribute of `node` to `assign` or, for open schemas, to the
/// returned list of unmapped attributes.
///
/// Closed schemas skip namespace declarations; open schemas keep them with
/// the unmapped attributes.
pub fn assign_attributes<F: Copy>(
    node: &AttributedTree,
    context: &str,
    table: &AttributeTable<F>,
    policy: SchemaPolicy,
    mut assign: impl FnMut(F, &str) -> Result<(), FieldError>,
) -> CycoResult<Vec<(String, String)>> {
    let mut unmapped = Vec::new();
    for (name, raw) in &node.attributes {
        match table.resolve(context, name) {
            Some(field) => assign(field, raw).map_err(|err| match err {
                FieldError::Malformed(expected) => {
                    CycoError::malformed(context, name, raw.as_str(), expected)
                }
                FieldError::NotApplicable => CycoError::attribute_not_found(context, name),
            })?,
            None => match policy {
                SchemaPolicy::Open => unmapped.push((name.clone(), raw.clone())),
                SchemaPolicy::Closed if is_namespace_declaration(name) => {}
                SchemaPolicy::Closed => {
                    return Err(CycoError::attribute_not_found(context, name));
                }
            },
        }
    }
    Ok(unmapped)
}

/// Typed attributes of `context` that `read` has a value for.
pub fn collect_attributes<F: Copy>(
    context: &str,
    table: &AttributeTable<F>,
    mut read: impl FnMut(F) -> Option<String>,
) -> Vec<(String, String)> {
    table
        .fields_for(context)
        .filter_map(|(attribute, field)| read(field).map(|value| (attribute.to_string(), value)))
        .collect()
}

/// Kind of a child element, or [`CycoError::UnknownSchemaTag`].
pub fn resolve_tag<T: Copy + PartialEq>(
    table: &TagTable<T>,
    format: &'static str,
    parent: &str,
    node: &AttributedTree,
) -> CycoResult<T> {
    table
        .resolve(parent, node.local_name())
        .ok_or_else(|| CycoError::UnknownSchemaTag {
            format,
            tag: node.tag.clone(),
        })
}

pub fn expect_root(tree: &AttributedTree, root: &str, format: &'static str) -> CycoResult<()> {
    if tree.local_name() == root {
        Ok(())
    } else {
        Err(CycoError::UnknownSchemaTag {
            format,
            tag: tree.tag.clone(),
        })
    }
}

pub fn required<T>(value: Option<T>, context: &str, attribute: &str) -> CycoResult<T> {
    value.ok_or_else(|| CycoError::missing_attribute(context, attribute))
}

pub fn prefixed(prefix: &str, local: &str) -> String {
    format!("{prefix}:{local}")
}

/// Finite numbers only; `NaN` and infinities are malformed.
pub fn parse_number(raw: &str) -> Result<f64, FieldError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(FieldError::Malformed("a number"))
}

pub fn parse_flag(raw: &str) -> Result<bool, FieldError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FieldError::Malformed("'true' or 'false'")),
    }
}

pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Mutable view of one optional domain field.
///
/// Lets a format describe its fields once and use that description both to
/// store parsed values and to render them back.
pub enum Slot<'a> {
    Text(&'a mut Option<String>),
    Number(&'a mut Option<f64>),
    Flag(&'a mut Option<bool>),
    ExportMode(&'a mut Option<ExportMode>),
    LogLevel(&'a mut Option<LogLevel>),
}

impl Slot<'_> {
    pub fn assign(self, raw: &str) -> Result<(), FieldError> {
        match self {
            Slot::Text(slot) => *slot = Some(raw.to_string()),
            Slot::Number(slot) => *slot = Some(parse_number(raw)?),
            Slot::Flag(slot) => *slot = Some(parse_flag(raw)?),
            Slot::ExportMode(slot) => *slot = Some(raw.parse().map_err(FieldError::Malformed)?),
            Slot::LogLevel(slot) => *slot = Some(raw.parse().map_err(FieldError::Malformed)?),
        }
        Ok(())
    }

    pub fn render(self) -> Option<String> {
        match self {
            Slot::Text(slot) => slot.clone(),
            Slot::Number(slot) => slot.map(format_number),
            Slot::Flag(slot) => slot.map(|flag| flag.to_string()),
            Slot::ExportMode(slot) => slot.map(|mode| mode.to_string()),
            Slot::LogLevel(slot) => slot.map(|level| level.to_string()),
        }
    }
}
