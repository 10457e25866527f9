//! PAR ⇄ parameter sets.

use cyco_core::parameters::{Parameter, ParameterSet, ParameterType, Reference};
use cyco_core::{CycoError, CycoResult};
use tracing::debug;

use super::{
    assign_attributes, collect_attributes, expect_root, required, resolve_tag, FieldError,
    SchemaPolicy,
};
use crate::schema::parameters::{ParElement, ParField, FORMAT, PAR_ATTRIBUTES, PAR_TAGS, ROOT};
use crate::schema::DYNAWO_NAMESPACE;
use crate::tree::AttributedTree;

/// Raw attributes of one `set`, `par` or `reference` element.
#[derive(Debug, Default)]
struct Entry {
    id: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    value: Option<String>,
    origin_data: Option<String>,
    origin_name: Option<String>,
    component_id: Option<String>,
}

impl Entry {
    fn read(node: &AttributedTree, context: &str) -> CycoResult<Self> {
        let mut entry = Entry::default();
        assign_attributes(node, context, &PAR_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
            let target = match field {
                ParField::Id => &mut entry.id,
                ParField::Type => &mut entry.kind,
                ParField::Name => &mut entry.name,
                ParField::Value => &mut entry.value,
                ParField::OriginData => &mut entry.origin_data,
                ParField::OriginName => &mut entry.origin_name,
                ParField::ComponentId => &mut entry.component_id,
            };
            *target = Some(raw.to_string());
            Ok::<(), FieldError>(())
        })?;
        Ok(entry)
    }

    fn kind(&mut self, context: &str) -> CycoResult<ParameterType> {
        let raw = required(self.kind.take(), context, "type")?;
        raw.parse()
            .map_err(|expected| CycoError::malformed(context, "type", raw.as_str(), expected))
    }
}

pub fn parse_parameters(tree: &AttributedTree) -> CycoResult<Vec<ParameterSet>> {
    expect_root(tree, ROOT, FORMAT)?;
    Entry::read(tree, ROOT)?;

    let mut sets = Vec::with_capacity(tree.children.len());
    for node in &tree.children {
        match resolve_tag(&PAR_TAGS, FORMAT, ROOT, node)? {
            ParElement::Set => sets.push(parse_set(node)?),
            ParElement::Par | ParElement::Reference => {
                return Err(CycoError::UnknownSchemaTag {
                    format: FORMAT,
                    tag: node.tag.clone(),
                })
            }
        }
    }
    debug!(sets = sets.len(), "parsed parameter sets");
    Ok(sets)
}

fn parse_set(node: &AttributedTree) -> CycoResult<ParameterSet> {
    let id = required(Entry::read(node, "set")?.id, "set", "id")?;
    let mut set = ParameterSet::new(id);

    for child in &node.children {
        match resolve_tag(&PAR_TAGS, FORMAT, "set", child)? {
            ParElement::Par => {
                let parameter = parse_par(child)?;
                if set.parameter(&parameter.name).is_some() {
                    debug!(set = %set.id, name = %parameter.name, "parameter redefined");
                }
                set.add_parameter(parameter);
            }
            ParElement::Reference => set.add_reference(parse_reference(child)?),
            ParElement::Set => {
                return Err(CycoError::UnknownSchemaTag {
                    format: FORMAT,
                    tag: child.tag.clone(),
                })
            }
        }
    }
    Ok(set)
}

fn parse_par(node: &AttributedTree) -> CycoResult<Parameter> {
    let mut entry = Entry::read(node, "par")?;
    let kind = entry.kind("par")?;
    let name = required(entry.name, "par", "name")?;
    let value = required(entry.value, "par", "value")?;
    kind.validate(&value)
        .map_err(|expected| CycoError::malformed(format!("par '{name}'"), "value", value.as_str(), expected))?;
    Ok(Parameter::new(name, kind, value))
}

fn parse_reference(node: &AttributedTree) -> CycoResult<Reference> {
    let mut entry = Entry::read(node, "reference")?;
    Ok(Reference {
        kind: entry.kind("reference")?,
        name: required(entry.name, "reference", "name")?,
        origin_data_source: required(entry.origin_data, "reference", "origData")?,
        origin_name: required(entry.origin_name, "reference", "origName")?,
        component_id: entry.component_id,
    })
}

pub fn serialize_parameters(sets: &[ParameterSet]) -> AttributedTree {
    let mut root = AttributedTree::new(ROOT).with_attribute("xmlns", DYNAWO_NAMESPACE);
    for set in sets {
        let mut node = AttributedTree::new("set").with_attribute("id", set.id.as_str());
        for parameter in set.parameters() {
            node.children.push(AttributedTree {
                tag: "par".to_string(),
                attributes: collect_attributes("par", &PAR_ATTRIBUTES, |field| match field {
                    ParField::Type => Some(parameter.kind.to_string()),
                    ParField::Name => Some(parameter.name.clone()),
                    ParField::Value => Some(parameter.value.clone()),
                    _ => None,
                }),
                children: Vec::new(),
            });
        }
        for reference in set.references() {
            node.children.push(AttributedTree {
                tag: "reference".to_string(),
                attributes: collect_attributes("reference", &PAR_ATTRIBUTES, |field| match field {
                    ParField::Type => Some(reference.kind.to_string()),
                    ParField::Name => Some(reference.name.clone()),
                    ParField::OriginData => Some(reference.origin_data_source.clone()),
                    ParField::OriginName => Some(reference.origin_name.clone()),
                    ParField::ComponentId => reference.component_id.clone(),
                    _ => None,
                }),
                children: Vec::new(),
            });
        }
        root.children.push(node);
    }
    root
}
