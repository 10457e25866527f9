use tracing::{debug, warn};

use super::federate::CosimulationFederate;
use crate::error::{CycoError, CycoResult};

/// A link between simulator variables exchanged through the co-simulator.
///
/// With a single variable the link is a plain publication. With two, a
/// directed link names its `emitter`, which must be one of the two variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConnection {
    pub name: String,
    pub variable_1: String,
    pub variable_2: Option<String>,
    pub bilateral: bool,
    pub emitter: Option<String>,
}

impl SimulationConnection {
    pub fn publication(name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable_1: variable.into(),
            variable_2: None,
            bilateral: true,
            emitter: None,
        }
    }

    pub fn directed(
        name: impl Into<String>,
        variable_1: impl Into<String>,
        variable_2: impl Into<String>,
        emitter: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            variable_1: variable_1.into(),
            variable_2: Some(variable_2.into()),
            bilateral: false,
            emitter,
        }
    }
}

/// The set of federates taking part in one co-simulation.
#[derive(Debug, Clone, Default)]
pub struct Cosimulation {
    /// Federate wrapping the power-system simulator
    pub power_system: CosimulationFederate,
    federates: Vec<CosimulationFederate>,
}

impl Cosimulation {
    pub fn new(power_system: CosimulationFederate) -> Self {
        Self {
            power_system,
            federates: Vec::new(),
        }
    }

    /// Register a connection on the power-system federate.
    pub fn add_connection(&mut self, connection: SimulationConnection) -> CycoResult<()> {
        let fed = &mut self.power_system;
        let Some(variable_2) = connection.variable_2 else {
            debug!(name = %connection.name, "registering publication");
            fed.add_publication(connection.name, Some(connection.variable_1));
            return Ok(());
        };

        if connection.bilateral {
            warn!(
                name = %connection.name,
                "bilateral connections inside one federate are not registered"
            );
            return Ok(());
        }

        let emitter = connection.emitter.as_deref();
        let (published, subscribed) = if emitter == Some(connection.variable_1.as_str()) {
            (connection.variable_1, variable_2)
        } else if emitter == Some(variable_2.as_str()) {
            (variable_2, connection.variable_1)
        } else {
            return Err(CycoError::AmbiguousConnection {
                name: connection.name,
                emitter: connection.emitter,
            });
        };
        fed.add_publication(connection.name.clone(), Some(published));
        fed.add_subscription(connection.name, Some(subscribed));
        Ok(())
    }

    pub fn add_connections(
        &mut self,
        connections: impl IntoIterator<Item = SimulationConnection>,
    ) -> CycoResult<()> {
        for connection in connections {
            self.add_connection(connection)?;
        }
        Ok(())
    }

    /// Register an additional federate; names must be unique.
    pub fn add_federate(&mut self, federate: CosimulationFederate) -> CycoResult<()> {
        let taken = self.power_system.name == federate.name
            || self.federates.iter().any(|f| f.name == federate.name);
        if taken {
            return Err(CycoError::DuplicateFederate(federate.name));
        }
        self.federates.push(federate);
        Ok(())
    }

    pub fn federates(&self) -> impl Iterator<Item = &CosimulationFederate> {
        std::iter::once(&self.power_system).chain(self.federates.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_variable_becomes_publication() {
        let mut cosim = Cosimulation::default();
        cosim
            .add_connection(SimulationConnection::publication("P1", "P@GEN1"))
            .unwrap();
        assert_eq!(cosim.power_system.publications.len(), 1);
        assert_eq!(cosim.power_system.publications[0].info.as_deref(), Some("P@GEN1"));
        assert!(cosim.power_system.subscriptions.is_empty());
    }

    #[test]
    fn emitter_side_publishes() {
        let mut cosim = Cosimulation::default();
        cosim
            .add_connection(SimulationConnection::directed(
                "U",
                "U@BUS1",
                "Uref@AVR1",
                Some("U@BUS1".into()),
            ))
            .unwrap();
        let fed = &cosim.power_system;
        assert_eq!(fed.publications[0].info.as_deref(), Some("U@BUS1"));
        assert_eq!(fed.subscriptions[0].info.as_deref(), Some("Uref@AVR1"));

        let mut cosim = Cosimulation::default();
        cosim
            .add_connection(SimulationConnection::directed(
                "U",
                "U@BUS1",
                "Uref@AVR1",
                Some("Uref@AVR1".into()),
            ))
            .unwrap();
        let fed = &cosim.power_system;
        assert_eq!(fed.publications[0].info.as_deref(), Some("Uref@AVR1"));
        assert_eq!(fed.subscriptions[0].info.as_deref(), Some("U@BUS1"));
    }

    #[test]
    fn unknown_emitter_is_ambiguous() {
        let mut cosim = Cosimulation::default();
        let err = cosim
            .add_connection(SimulationConnection::directed(
                "U",
                "U@BUS1",
                "Uref@AVR1",
                Some("other".into()),
            ))
            .unwrap_err();
        assert!(matches!(err, CycoError::AmbiguousConnection { .. }));

        let err = cosim
            .add_connection(SimulationConnection::directed("U", "a", "b", None))
            .unwrap_err();
        assert!(matches!(err, CycoError::AmbiguousConnection { emitter: None, .. }));
        assert!(cosim.power_system.publications.is_empty());
    }

    #[test]
    fn bilateral_pair_is_not_registered() {
        let mut cosim = Cosimulation::default();
        let mut conn = SimulationConnection::directed("U", "a", "b", None);
        conn.bilateral = true;
        cosim.add_connection(conn).unwrap();
        assert!(cosim.power_system.publications.is_empty());
    }

    #[test]
    fn duplicate_federates_are_rejected() {
        let mut cosim = Cosimulation::default();
        cosim
            .add_federate(CosimulationFederate::new("Omnet"))
            .unwrap();
        let err = cosim
            .add_federate(CosimulationFederate::new("Omnet"))
            .unwrap_err();
        assert!(matches!(err, CycoError::DuplicateFederate(name) if name == "Omnet"));
        let err = cosim
            .add_federate(CosimulationFederate::new("Dynawo"))
            .unwrap_err();
        assert!(matches!(err, CycoError::DuplicateFederate(_)));
        assert_eq!(cosim.federates().count(), 2);
    }
}
