//! Co-simulation interface synthesis.
//!
//! Exposing network variables to the co-simulator takes one extra black-box
//! model (the proxy automaton) plus its parameter set. Every publication of
//! the power-system federate becomes one automaton input, wired from the
//! owning model's variable and named after the publication key:
//!
//! ```text
//! publication #i  key="P1" info="<variable>@<model>"
//!   → connect  <model>.<variable>  →  CosimInterface.automaton_inputs_<i>_
//!   → par STRING automaton_InputsName_<i>_ = "P1"
//! ```
//!
//! [`synthesize`] is pure: it reads the federate and the existing models and
//! returns the elements to add. [`CosimInterface::apply`] appends them.
//! Running synthesis on models that already contain the proxy fails with
//! [`CycoError::DuplicateProxy`] instead of stacking a second proxy.

use tracing::info;

use super::federate::{split_variable_reference, CosimulationFederate, Subscription};
use crate::dynamic::{Connection, DynamicComponent, DynamicModel};
use crate::error::{CycoError, CycoResult};
use crate::parameters::{Parameter, ParameterSet, ParameterType};

/// Id of the proxy model and of its parameter set.
pub const PROXY_ID: &str = "CosimInterface";

/// Library implementing the proxy automaton.
pub const PROXY_LIBRARY: &str = "CosimulationAutomaton";

/// Ratio between the automaton sampling time and the federate period.
///
/// Carried over unchanged from the co-simulation setup this tool replaces;
/// its rationale awaits domain review.
pub const SAMPLING_TIME_SCALE: f64 = 2.0;

pub const SAMPLING_TIME_PARAMETER: &str = "automaton_SamplingTime";
pub const INPUT_COUNT_PARAMETER: &str = "automaton_NbInputs";
pub const OUTPUT_COUNT_PARAMETER: &str = "automaton_NbOutputs";

pub fn input_variable(index: usize) -> String {
    format!("automaton_inputs_{index}_")
}

pub fn input_name_parameter(index: usize) -> String {
    format!("automaton_InputsName_{index}_")
}

/// Elements exposing a federate's publications to the co-simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct CosimInterface {
    pub component: DynamicComponent,
    pub connections: Vec<Connection>,
    pub parameter_set: ParameterSet,
}

/// Build the proxy model for `federate`.
///
/// Returns `Ok(None)` when the federate publishes nothing; no empty proxy is
/// ever produced.
pub fn synthesize(
    federate: &CosimulationFederate,
    dynamic_model: &DynamicModel,
    parameter_sets: &[ParameterSet],
    network_parameter_file: &str,
) -> CycoResult<Option<CosimInterface>> {
    if federate.publications.is_empty() {
        return Ok(None);
    }
    ensure_proxy_absent(dynamic_model, parameter_sets)?;

    let component = DynamicComponent {
        id: Some(PROXY_ID.to_string()),
        library: Some(PROXY_LIBRARY.to_string()),
        parameter_file: Some(network_parameter_file.to_string()),
        parameter_id: Some(PROXY_ID.to_string()),
        ..DynamicComponent::default()
    };

    let mut parameter_set = ParameterSet::new(PROXY_ID);
    parameter_set.add_parameter(Parameter::new(
        SAMPLING_TIME_PARAMETER,
        ParameterType::Double,
        format!("{:?}", federate.period * SAMPLING_TIME_SCALE),
    ));

    let mut connections = Vec::with_capacity(federate.publications.len());
    for (offset, publication) in federate.publications.iter().enumerate() {
        let index = offset + 1;
        let info = publication.info.as_deref().ok_or_else(|| {
            CycoError::missing_attribute(format!("publication '{}'", publication.key), "info")
        })?;
        let (variable, model) = split_variable_reference(info).ok_or_else(|| {
            CycoError::malformed(
                format!("publication '{}'", publication.key),
                "info",
                info,
                "a '<variable>@<component id>' reference",
            )
        })?;
        connections.push(Connection::direct(model, variable, PROXY_ID, input_variable(index)));
        parameter_set.add_parameter(Parameter::new(
            input_name_parameter(index),
            ParameterType::String,
            publication.key.clone(),
        ));
    }

    let outputs = wire_subscriptions(&federate.subscriptions);
    parameter_set.add_parameter(Parameter::new(
        INPUT_COUNT_PARAMETER,
        ParameterType::Int,
        federate.publications.len().to_string(),
    ));
    parameter_set.add_parameter(Parameter::new(
        OUTPUT_COUNT_PARAMETER,
        ParameterType::Int,
        outputs.len().to_string(),
    ));
    connections.extend(outputs);

    Ok(Some(CosimInterface {
        component,
        connections,
        parameter_set,
    }))
}

/// Automaton outputs driven by subscriptions.
///
/// Subscriptions are parsed and re-emitted in the federate document but not
/// wired into the automaton yet, so this contributes no connection and the
/// output count stays at zero. Output wiring belongs here.
fn wire_subscriptions(_subscriptions: &[Subscription]) -> Vec<Connection> {
    Vec::new()
}

fn ensure_proxy_absent(
    dynamic_model: &DynamicModel,
    parameter_sets: &[ParameterSet],
) -> CycoResult<()> {
    if dynamic_model.component(PROXY_ID).is_some() || parameter_sets.iter().any(|s| s.id == PROXY_ID)
    {
        return Err(CycoError::DuplicateProxy(PROXY_ID.to_string()));
    }
    Ok(())
}

impl CosimInterface {
    /// Append the proxy to both models.
    pub fn apply(
        self,
        dynamic_model: &mut DynamicModel,
        parameter_sets: &mut Vec<ParameterSet>,
    ) -> CycoResult<()> {
        ensure_proxy_absent(dynamic_model, parameter_sets)?;
        info!(
            inputs = self.connections.len(),
            proxy = PROXY_ID,
            "adding co-simulation interface"
        );
        dynamic_model.push(self.component);
        for connection in self.connections {
            dynamic_model.push(connection);
        }
        parameter_sets.push(self.parameter_set);
        Ok(())
    }
}

/// Synthesize and apply in one step. Returns whether anything was added.
pub fn extend_models(
    federate: &CosimulationFederate,
    dynamic_model: &mut DynamicModel,
    parameter_sets: &mut Vec<ParameterSet>,
    network_parameter_file: &str,
) -> CycoResult<bool> {
    match synthesize(federate, dynamic_model, parameter_sets, network_parameter_file)? {
        Some(interface) => {
            interface.apply(dynamic_model, parameter_sets)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::{DirectConnection, DynamicElement};

    fn federate(publications: &[(&str, &str)], period: f64) -> CosimulationFederate {
        let mut fed = CosimulationFederate::default();
        fed.period = period;
        for (key, info) in publications {
            fed.add_publication(*key, Some(info.to_string()));
        }
        fed
    }

    #[test]
    fn builds_proxy_in_publication_order() {
        let fed = federate(&[("P1", "P@Gen1"), ("P2", "Q@Gen1")], 0.5);
        let interface = synthesize(&fed, &DynamicModel::new(), &[], "IEEE14.par")
            .unwrap()
            .expect("publications yield a proxy");

        assert_eq!(interface.component.id.as_deref(), Some(PROXY_ID));
        assert_eq!(interface.component.library.as_deref(), Some(PROXY_LIBRARY));
        assert_eq!(interface.component.parameter_file.as_deref(), Some("IEEE14.par"));
        assert_eq!(interface.component.parameter_id.as_deref(), Some(PROXY_ID));

        let set = &interface.parameter_set;
        assert_eq!(set.id, PROXY_ID);
        assert_eq!(set.parameter("automaton_SamplingTime").unwrap().value, "1.0");
        assert_eq!(set.parameter("automaton_InputsName_1_").unwrap().value, "P1");
        assert_eq!(set.parameter("automaton_InputsName_2_").unwrap().value, "P2");
        assert_eq!(set.parameter("automaton_NbInputs").unwrap().value, "2");
        assert_eq!(set.parameter("automaton_NbOutputs").unwrap().value, "0");
        assert_eq!(
            set.parameter("automaton_InputsName_2_").unwrap().kind,
            ParameterType::String
        );

        assert_eq!(
            interface.connections,
            vec![
                Connection::Direct(DirectConnection {
                    id_1: Some("Gen1".into()),
                    variable_1: Some("P".into()),
                    id_2: Some(PROXY_ID.into()),
                    variable_2: Some("automaton_inputs_1_".into()),
                }),
                Connection::direct("Gen1", "Q", PROXY_ID, "automaton_inputs_2_"),
            ]
        );
    }

    #[test]
    fn no_publications_no_proxy() {
        let mut fed = federate(&[], 1.0);
        fed.add_subscription("S1", Some("U@BUS1".into()));
        let mut model = DynamicModel::new();
        let mut sets = Vec::new();
        let added = extend_models(&fed, &mut model, &mut sets, "net.par").unwrap();
        assert!(!added);
        assert!(model.is_empty());
        assert!(sets.is_empty());
    }

    #[test]
    fn second_run_is_rejected() {
        let fed = federate(&[("P1", "P@Gen1")], 1.0);
        let mut model = DynamicModel::new();
        let mut sets = vec![ParameterSet::new("GEN1")];

        assert!(extend_models(&fed, &mut model, &mut sets, "net.par").unwrap());
        assert_eq!(model.len(), 2);
        assert!(matches!(model.elements[0], DynamicElement::Component(_)));
        assert_eq!(sets.len(), 2);

        let err = extend_models(&fed, &mut model, &mut sets, "net.par").unwrap_err();
        assert!(matches!(err, CycoError::DuplicateProxy(_)));
        assert_eq!(model.len(), 2);
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn existing_parameter_set_blocks_synthesis() {
        let fed = federate(&[("P1", "P@Gen1")], 1.0);
        let err = synthesize(&fed, &DynamicModel::new(), &[ParameterSet::new(PROXY_ID)], "x.par")
            .unwrap_err();
        assert!(matches!(err, CycoError::DuplicateProxy(_)));
    }

    #[test]
    fn malformed_reference_is_reported() {
        let fed = federate(&[("P1", "Gen1/P")], 1.0);
        let err = synthesize(&fed, &DynamicModel::new(), &[], "x.par").unwrap_err();
        match err {
            CycoError::MalformedValue { attribute, value, .. } => {
                assert_eq!(attribute, "info");
                assert_eq!(value, "Gen1/P");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn synthesis_is_deterministic() {
        let fed = federate(&[("A", "x@M1"), ("B", "y@M2"), ("C", "z@M1")], 0.25);
        let first = synthesize(&fed, &DynamicModel::new(), &[], "n.par").unwrap();
        let second = synthesize(&fed, &DynamicModel::new(), &[], "n.par").unwrap();
        assert_eq!(first, second);
        let first = first.unwrap();
        assert_eq!(first.parameter_set.parameter("automaton_SamplingTime").unwrap().value, "0.5");
        let targets: Vec<_> = first
            .connections
            .iter()
            .map(|c| match c {
                Connection::Direct(d) => d.variable_2.clone().unwrap(),
                Connection::Macro(_) => unreachable!(),
            })
            .collect();
        assert_eq!(
            targets,
            vec!["automaton_inputs_1_", "automaton_inputs_2_", "automaton_inputs_3_"]
        );
    }
}
