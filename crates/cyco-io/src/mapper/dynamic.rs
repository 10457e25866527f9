//! DYD ⇄ [`DynamicModel`].
//!
//! Element order is kept across kinds: a connection written between two
//! black boxes comes back between them.

use cyco_core::dynamic::{
    Connection, Connector, DirectConnection, DynamicComponent, DynamicElement, DynamicModel,
    MacroConnection, StaticReference, TemplateConnection,
};
use cyco_core::{CycoError, CycoResult};
use tracing::debug;

use super::{
    assign_attributes, collect_attributes, expect_root, prefixed, required, resolve_tag,
    FieldError, SchemaPolicy,
};
use crate::schema::dynamic::{DydElement, DydField, DYD_ATTRIBUTES, DYD_TAGS, FORMAT, PREFIX, ROOT};
use crate::schema::DYNAWO_NAMESPACE;
use crate::tree::AttributedTree;

/// Accessor of one text field of a DYD element.
type TextSlot<T> = fn(&mut T, DydField) -> Option<&mut Option<String>>;

pub fn parse_dynamic(tree: &AttributedTree) -> CycoResult<DynamicModel> {
    expect_root(tree, ROOT, FORMAT)?;
    assign_attributes(tree, ROOT, &DYD_ATTRIBUTES, SchemaPolicy::Closed, |_, _| {
        Err(FieldError::NotApplicable)
    })?;

    let mut model = DynamicModel::new();
    for node in &tree.children {
        let element: DynamicElement = match resolve_tag(&DYD_TAGS, FORMAT, ROOT, node)? {
            DydElement::BlackBoxModel => parse_black_box(node)?.into(),
            DydElement::MacroConnector => parse_connector(node)?.into(),
            DydElement::MacroConnect => Connection::Macro(parse_macro_connect(node)?).into(),
            DydElement::Connect => Connection::Direct(parse_text_fields(
                node,
                DydElement::Connect,
                direct_slot,
            )?)
            .into(),
            DydElement::StaticRef | DydElement::TemplateConnect => {
                return Err(unknown_tag(node));
            }
        };
        model.push(element);
    }

    debug!(
        components = model.components().count(),
        connectors = model.connectors().count(),
        connections = model.connections().count(),
        "parsed dynamic model"
    );
    Ok(model)
}

fn unknown_tag(node: &AttributedTree) -> CycoError {
    CycoError::UnknownSchemaTag {
        format: FORMAT,
        tag: node.tag.clone(),
    }
}

fn parse_black_box(node: &AttributedTree) -> CycoResult<DynamicComponent> {
    let mut component = parse_text_fields(node, DydElement::BlackBoxModel, component_slot)?;
    for child in &node.children {
        match resolve_tag(&DYD_TAGS, FORMAT, DydElement::BlackBoxModel.tag(), child)? {
            DydElement::StaticRef => component.static_references.push(parse_text_fields(
                child,
                DydElement::StaticRef,
                static_ref_slot,
            )?),
            _ => return Err(unknown_tag(child)),
        }
    }
    Ok(component)
}

fn parse_connector(node: &AttributedTree) -> CycoResult<Connector> {
    let mut connector = parse_text_fields(node, DydElement::MacroConnector, connector_slot)?;
    for child in &node.children {
        match resolve_tag(&DYD_TAGS, FORMAT, DydElement::MacroConnector.tag(), child)? {
            DydElement::TemplateConnect => connector.connections.push(parse_text_fields(
                child,
                DydElement::TemplateConnect,
                template_slot,
            )?),
            _ => return Err(unknown_tag(child)),
        }
    }
    Ok(connector)
}

fn parse_macro_connect(node: &AttributedTree) -> CycoResult<MacroConnection> {
    let context = DydElement::MacroConnect.context();
    let mut connector = None;
    let mut connection = MacroConnection::default();
    assign_attributes(node, context, &DYD_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
        let target = match field {
            DydField::Connector => &mut connector,
            _ => macro_slot(&mut connection, field).ok_or(FieldError::NotApplicable)?,
        };
        *target = Some(raw.to_string());
        Ok(())
    })?;
    if let Some(child) = node.children.first() {
        return Err(unknown_tag(child));
    }
    connection.connector = required(connector, context, "connector")?;
    Ok(connection)
}

fn parse_text_fields<T: Default>(
    node: &AttributedTree,
    element: DydElement,
    slot: TextSlot<T>,
) -> CycoResult<T> {
    let mut value = T::default();
    assign_attributes(
        node,
        element.context(),
        &DYD_ATTRIBUTES,
        SchemaPolicy::Closed,
        |field, raw| {
            let target = slot(&mut value, field).ok_or(FieldError::NotApplicable)?;
            *target = Some(raw.to_string());
            Ok(())
        },
    )?;
    if let Some(child) = node.children.first() {
        if element != DydElement::BlackBoxModel && element != DydElement::MacroConnector {
            return Err(unknown_tag(child));
        }
    }
    Ok(value)
}

pub fn serialize_dynamic(model: &DynamicModel) -> AttributedTree {
    let mut root = AttributedTree::new(prefixed(PREFIX, ROOT))
        .with_attribute(format!("xmlns:{PREFIX}"), DYNAWO_NAMESPACE);
    for element in &model.elements {
        root.children.push(match element {
            DynamicElement::Component(component) => {
                let mut node = text_element(component, DydElement::BlackBoxModel, component_slot);
                node.children = component
                    .static_references
                    .iter()
                    .map(|r| text_element(r, DydElement::StaticRef, static_ref_slot))
                    .collect();
                node
            }
            DynamicElement::Connector(connector) => {
                let mut node = text_element(connector, DydElement::MacroConnector, connector_slot);
                node.children = connector
                    .connections
                    .iter()
                    .map(|c| text_element(c, DydElement::TemplateConnect, template_slot))
                    .collect();
                node
            }
            DynamicElement::Connection(Connection::Direct(direct)) => {
                text_element(direct, DydElement::Connect, direct_slot)
            }
            DynamicElement::Connection(Connection::Macro(connection)) => {
                let mut scratch = connection.clone();
                let element = DydElement::MacroConnect;
                AttributedTree {
                    tag: prefixed(PREFIX, element.tag()),
                    attributes: collect_attributes(element.context(), &DYD_ATTRIBUTES, |field| {
                        match field {
                            DydField::Connector => Some(connection.connector.clone()),
                            _ => macro_slot(&mut scratch, field).and_then(|value| value.clone()),
                        }
                    }),
                    children: Vec::new(),
                }
            }
        });
    }
    root
}

fn text_element<T: Clone>(value: &T, element: DydElement, slot: TextSlot<T>) -> AttributedTree {
    let mut scratch = value.clone();
    AttributedTree {
        tag: prefixed(PREFIX, element.tag()),
        attributes: collect_attributes(element.context(), &DYD_ATTRIBUTES, |field| {
            slot(&mut scratch, field).and_then(|value| value.clone())
        }),
        children: Vec::new(),
    }
}

fn component_slot(component: &mut DynamicComponent, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Id => Some(&mut component.id),
        DydField::Library => Some(&mut component.library),
        DydField::ParameterFile => Some(&mut component.parameter_file),
        DydField::ParameterId => Some(&mut component.parameter_id),
        DydField::StaticId => Some(&mut component.static_id),
        _ => None,
    }
}

fn static_ref_slot(reference: &mut StaticReference, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Variable => Some(&mut reference.variable),
        DydField::StaticVariable => Some(&mut reference.static_variable),
        _ => None,
    }
}

fn connector_slot(connector: &mut Connector, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Id => Some(&mut connector.id),
        _ => None,
    }
}

fn template_slot(pin: &mut TemplateConnection, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Variable1 => Some(&mut pin.variable_1),
        DydField::Variable2 => Some(&mut pin.variable_2),
        _ => None,
    }
}

fn direct_slot(connection: &mut DirectConnection, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Id1 => Some(&mut connection.id_1),
        DydField::Variable1 => Some(&mut connection.variable_1),
        DydField::Id2 => Some(&mut connection.id_2),
        DydField::Variable2 => Some(&mut connection.variable_2),
        _ => None,
    }
}

fn macro_slot(connection: &mut MacroConnection, field: DydField) -> Option<&mut Option<String>> {
    match field {
        DydField::Id1 => Some(&mut connection.id_1),
        DydField::Index1 => Some(&mut connection.index_1),
        DydField::Id2 => Some(&mut connection.id_2),
        DydField::Index2 => Some(&mut connection.index_2),
        DydField::Name1 => Some(&mut connection.name_1),
        DydField::Name2 => Some(&mut connection.name_2),
        _ => None,
    }
}
