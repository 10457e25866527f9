//! Dynamic model wiring.
//!
//! The dynamic model lists the simulator's black-box models and the variable
//! connections between them, in document order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicModel {
    pub elements: Vec<DynamicElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DynamicElement {
    Component(DynamicComponent),
    Connector(Connector),
    Connection(Connection),
}

impl DynamicModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: impl Into<DynamicElement>) {
        self.elements.push(element.into());
    }

    pub fn components(&self) -> impl Iterator<Item = &DynamicComponent> {
        self.elements.iter().filter_map(|e| match e {
            DynamicElement::Component(c) => Some(c),
            _ => None,
        })
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.elements.iter().filter_map(|e| match e {
            DynamicElement::Connector(c) => Some(c),
            _ => None,
        })
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.elements.iter().filter_map(|e| match e {
            DynamicElement::Connection(c) => Some(c),
            _ => None,
        })
    }

    pub fn component(&self, id: &str) -> Option<&DynamicComponent> {
        self.components().find(|c| c.id.as_deref() == Some(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<DynamicComponent> for DynamicElement {
    fn from(value: DynamicComponent) -> Self {
        DynamicElement::Component(value)
    }
}

impl From<Connector> for DynamicElement {
    fn from(value: Connector) -> Self {
        DynamicElement::Connector(value)
    }
}

impl From<Connection> for DynamicElement {
    fn from(value: Connection) -> Self {
        DynamicElement::Connection(value)
    }
}

/// A black-box model instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicComponent {
    pub id: Option<String>,
    pub library: Option<String>,
    pub parameter_file: Option<String>,
    pub parameter_id: Option<String>,
    /// Id of the static network element this model is attached to
    pub static_id: Option<String>,
    pub static_references: Vec<StaticReference>,
}

/// Binds a dynamic variable to a static-network variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticReference {
    pub variable: Option<String>,
    pub static_variable: Option<String>,
}

/// Reusable connection template instantiated by macro connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: Option<String>,
    pub connections: Vec<TemplateConnection>,
}

/// One variable pair of a [`Connector`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConnection {
    pub variable_1: Option<String>,
    pub variable_2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Connection {
    /// `id_1.variable_1` wired to `id_2.variable_2`
    Direct(DirectConnection),
    /// Instantiation of a named [`Connector`] between two models
    Macro(MacroConnection),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectConnection {
    pub id_1: Option<String>,
    pub variable_1: Option<String>,
    pub id_2: Option<String>,
    pub variable_2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroConnection {
    pub connector: String,
    pub id_1: Option<String>,
    pub index_1: Option<String>,
    pub id_2: Option<String>,
    pub index_2: Option<String>,
    pub name_1: Option<String>,
    pub name_2: Option<String>,
}

impl Connection {
    pub fn direct(
        id_1: impl Into<String>,
        variable_1: impl Into<String>,
        id_2: impl Into<String>,
        variable_2: impl Into<String>,
    ) -> Self {
        Connection::Direct(DirectConnection {
            id_1: Some(id_1.into()),
            variable_1: Some(variable_1.into()),
            id_2: Some(id_2.into()),
            variable_2: Some(variable_2.into()),
        })
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, Connection::Macro(_))
    }
}
