//! Static network model.
//!
//! A static network description is a tree of [`Component`]s mirroring the
//! element nesting of the source document (network → substation →
//! voltageLevel → bus / generator / load ...). Elements the schema knows carry
//! typed fields in their [`ComponentKind`]; everything else the document says
//! about them is kept verbatim in the [`Extension`] bag so the tree can be
//! written back without losing data.

use serde::{Deserialize, Serialize};

/// Ordered bag of attributes that have no typed field.
///
/// Insertion order is preserved so re-serialized documents list unknown
/// attributes in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extension(Vec<(String, String)>);

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute; a replaced value keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Extension {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut extension = Extension::new();
        for (k, v) in iter {
            extension.insert(k, v);
        }
        extension
    }
}

/// A node of the static network tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Element name in the source document (without namespace prefix)
    pub tag: String,
    pub id: Option<String>,
    pub kind: ComponentKind,
    /// Attributes with no typed field, kept verbatim
    pub extension: Extension,
    pub children: Vec<Component>,
}

impl Component {
    /// A component with no typed fields set.
    pub fn new(tag: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            kind,
            extension: Extension::new(),
            children: Vec::new(),
        }
    }

    pub fn generic(tag: impl Into<String>) -> Self {
        Self::new(tag, ComponentKind::Generic)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Depth-first search for a component by id, this node included.
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of components in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Component::count).sum::<usize>()
    }

    /// Pre-order iterator over this subtree.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

/// Typed payload of a component, selected by its tag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Structural or unmodelled element (network, substation, limits ...)
    #[default]
    Generic,
    Bus(Bus),
    Generator(Generator),
    Load(Load),
    Switch(Switch),
    ShuntCompensator(ShuntCompensator),
    StaticVarCompensator(StaticVarCompensator),
    AcLine(AcLine),
    Transformer(Transformer),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bus {
    /// Voltage magnitude (kV)
    pub voltage: Option<f64>,
    /// Nominal voltage (kV)
    pub nominal_voltage: Option<f64>,
    /// Voltage angle (degrees)
    pub phase_angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Generator {
    /// Id of the connection bus
    pub bus: Option<String>,
    pub active_power_min: Option<f64>,
    pub active_power_max: Option<f64>,
    pub reactive_power_min: Option<f64>,
    pub reactive_power_max: Option<f64>,
    pub voltage_regulation: Option<bool>,
    pub active_power_target: Option<f64>,
    pub voltage_magnitude_target: Option<f64>,
    pub reactive_power_target: Option<f64>,
    pub active_power_output: Option<f64>,
    pub reactive_power_output: Option<f64>,
    /// Rated apparent power (MVA)
    pub rated_apparent_power: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Load {
    pub bus: Option<String>,
    pub active_power_setpoint: Option<f64>,
    pub reactive_power_setpoint: Option<f64>,
    pub active_power_output: Option<f64>,
    pub reactive_power_output: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Switch {
    pub is_open: Option<bool>,
    pub voltage_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShuntCompensator {
    pub bus: Option<String>,
    /// Susceptance per section (S)
    pub susceptance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticVarCompensator {
    pub bus: Option<String>,
    pub reactive_power_setpoint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AcLine {
    pub bus_1: Option<String>,
    pub bus_2: Option<String>,
    /// Series resistance (Ω)
    pub resistance: Option<f64>,
    /// Series reactance (Ω)
    pub reactance: Option<f64>,
    /// Shunt susceptance on side 1 (S)
    pub half_shunt_susceptance: Option<f64>,
    pub rated_apparent_power: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transformer {
    pub bus_1: Option<String>,
    pub bus_2: Option<String>,
    pub resistance: Option<f64>,
    pub reactance: Option<f64>,
    pub magnetizing_susceptance: Option<f64>,
    pub rated_apparent_power: Option<f64>,
}
