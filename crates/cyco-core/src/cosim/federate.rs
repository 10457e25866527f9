use serde::Serialize;

/// Name given to the power-system federate when none is configured.
pub const DEFAULT_FEDERATE_NAME: &str = "Dynawo";

/// A co-simulation participant as described to the co-simulator.
///
/// Field order matches the emitted federate configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CosimulationFederate {
    pub name: String,
    pub core_type: String,
    pub terminate_on_error: bool,
    pub source_only: bool,
    pub observer: bool,
    pub only_update_on_change: bool,
    pub log_level: String,
    pub uninterruptible: bool,
    /// Sampling period (s)
    pub period: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub publications: Vec<Publication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<Subscription>,
}

impl Default for CosimulationFederate {
    fn default() -> Self {
        Self {
            name: DEFAULT_FEDERATE_NAME.to_string(),
            core_type: "zmq".to_string(),
            terminate_on_error: true,
            source_only: false,
            observer: false,
            only_update_on_change: true,
            log_level: "Debug".to_string(),
            uninterruptible: true,
            period: 1.0,
            publications: Vec::new(),
            subscriptions: Vec::new(),
        }
    }
}

impl CosimulationFederate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_publication(&mut self, key: impl Into<String>, info: Option<String>) {
        self.publications.push(Publication {
            key: key.into(),
            info,
        });
    }

    pub fn add_subscription(&mut self, key: impl Into<String>, info: Option<String>) {
        self.subscriptions.push(Subscription {
            key: key.into(),
            info,
        });
    }
}

/// A value the federate offers to the co-simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub key: String,
    /// `<variable>@<owning component id>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// A value the federate consumes from the co-simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub key: String,
    /// `<variable>@<owning component id>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// Split a `<variable>@<component>` reference.
pub fn split_variable_reference(info: &str) -> Option<(&str, &str)> {
    let (variable, component) = info.split_once('@')?;
    if variable.is_empty() || component.is_empty() || component.contains('@') {
        return None;
    }
    Some((variable, component))
}
