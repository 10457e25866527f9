//! Federate descriptors → [`Cosimulation`], and the power-system federate →
//! JSON federate config.
//!
//! Both input encodings end up as the same tree once normalized, so one
//! entry point, [`parse_federate`], handles either. Settings are shared: a
//! `parameter name="period"` in XML and a `"period"` member in JSON resolve
//! through the same table.

use std::io::Write;

use cyco_core::cosim::{Cosimulation, CosimulationFederate, SimulationConnection};
use cyco_core::{CycoError, CycoResult};
use tracing::debug;

use super::{
    assign_attributes, parse_flag, parse_number, required, resolve_tag, FieldError, SchemaPolicy,
};
use crate::schema::federate::{
    FederateElement, FederateField, FederateSetting, FEDERATE_ATTRIBUTES, FEDERATE_SETTINGS,
    FEDERATE_TAGS, FORMAT, JSON_ROOT, XML_ROOT,
};
use crate::tree::AttributedTree;

/// Parse either federate encoding, told apart by the root tag.
pub fn parse_federate(tree: &AttributedTree) -> CycoResult<Cosimulation> {
    let cosimulation = match tree.local_name() {
        XML_ROOT => parse_xml_federate(tree)?,
        JSON_ROOT => Cosimulation::new(parse_json_federate(tree)?),
        _ => {
            return Err(CycoError::UnknownSchemaTag {
                format: FORMAT,
                tag: tree.tag.clone(),
            })
        }
    };
    let federate = &cosimulation.power_system;
    debug!(
        name = %federate.name,
        publications = federate.publications.len(),
        subscriptions = federate.subscriptions.len(),
        period = federate.period,
        "parsed federate"
    );
    Ok(cosimulation)
}

fn parse_xml_federate(tree: &AttributedTree) -> CycoResult<Cosimulation> {
    assign_attributes(tree, XML_ROOT, &FEDERATE_ATTRIBUTES, SchemaPolicy::Closed, |_, _| {
        Err(FieldError::NotApplicable)
    })?;

    let mut cosimulation = Cosimulation::default();
    for node in &tree.children {
        match resolve_tag(&FEDERATE_TAGS, FORMAT, XML_ROOT, node)? {
            FederateElement::Connect => {
                let connections = node
                    .children
                    .iter()
                    .map(|child| {
                        resolve_tag(&FEDERATE_TAGS, FORMAT, "connect", child)?;
                        parse_publish(child)
                    })
                    .collect::<CycoResult<Vec<_>>>()?;
                cosimulation.add_connections(connections)?;
            }
            FederateElement::Parameters => {
                for child in &node.children {
                    resolve_tag(&FEDERATE_TAGS, FORMAT, "cosimulationParameters", child)?;
                    apply_parameter(&mut cosimulation.power_system, child)?;
                }
            }
            _ => {
                return Err(CycoError::UnknownSchemaTag {
                    format: FORMAT,
                    tag: node.tag.clone(),
                })
            }
        }
    }
    Ok(cosimulation)
}

fn parse_publish(node: &AttributedTree) -> CycoResult<SimulationConnection> {
    let mut name = None;
    let mut variable = None;
    let mut variable_2 = None;
    let mut bilateral = None;
    let mut emitter = None;
    assign_attributes(node, "publish", &FEDERATE_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
        match field {
            FederateField::ConnectionName => name = Some(raw.to_string()),
            FederateField::Variable => variable = Some(raw.to_string()),
            FederateField::Variable2 => variable_2 = Some(raw.to_string()),
            FederateField::Bilateral => bilateral = Some(parse_flag(raw)?),
            FederateField::Emitter => emitter = Some(raw.to_string()),
            _ => return Err(FieldError::NotApplicable),
        }
        Ok(())
    })?;

    let name = required(name, "publish", "name")?;
    let variable = required(variable, "publish", "variable")?;
    Ok(match variable_2 {
        None => SimulationConnection::publication(name, variable),
        Some(variable_2) => SimulationConnection {
            name,
            variable_1: variable,
            variable_2: Some(variable_2),
            bilateral: bilateral.unwrap_or(true),
            emitter,
        },
    })
}

fn apply_parameter(federate: &mut CosimulationFederate, node: &AttributedTree) -> CycoResult<()> {
    let (mut name, mut value) = (None, None);
    assign_attributes(node, "parameter", &FEDERATE_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
        match field {
            FederateField::ParameterName => name = Some(raw.to_string()),
            FederateField::ParameterValue => value = Some(raw.to_string()),
            _ => return Err(FieldError::NotApplicable),
        }
        Ok(())
    })?;
    let name = required(name, "parameter", "name")?;
    let value = required(value, "parameter", "value")?;

    let setting = FEDERATE_SETTINGS
        .resolve(JSON_ROOT, &name)
        .ok_or_else(|| CycoError::attribute_not_found("cosimulationParameters", name.as_str()))?;
    apply_setting(federate, setting, &value).map_err(|err| match err {
        FieldError::Malformed(expected) => {
            CycoError::malformed(format!("parameter '{name}'"), "value", value.as_str(), expected)
        }
        FieldError::NotApplicable => CycoError::attribute_not_found("cosimulationParameters", name.as_str()),
    })
}

fn parse_json_federate(tree: &AttributedTree) -> CycoResult<CosimulationFederate> {
    let mut federate = CosimulationFederate::default();
    assign_attributes(tree, JSON_ROOT, &FEDERATE_SETTINGS, SchemaPolicy::Closed, |setting, raw| {
        apply_setting(&mut federate, setting, raw)
    })?;

    for node in &tree.children {
        let element = resolve_tag(&FEDERATE_TAGS, FORMAT, JSON_ROOT, node)?;
        let context = node.local_name();
        let (mut key, mut info) = (None, None);
        assign_attributes(node, context, &FEDERATE_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
            match field {
                FederateField::Key => key = Some(raw.to_string()),
                FederateField::Info => info = Some(raw.to_string()),
                _ => return Err(FieldError::NotApplicable),
            }
            Ok(())
        })?;
        let key = required(key, context, "key")?;
        match element {
            FederateElement::Publication => federate.add_publication(key, info),
            FederateElement::Subscription => federate.add_subscription(key, info),
            _ => {
                return Err(CycoError::UnknownSchemaTag {
                    format: FORMAT,
                    tag: node.tag.clone(),
                })
            }
        }
    }
    Ok(federate)
}

fn apply_setting(
    federate: &mut CosimulationFederate,
    setting: FederateSetting,
    raw: &str,
) -> Result<(), FieldError> {
    match setting {
        FederateSetting::Name => federate.name = raw.to_string(),
        FederateSetting::CoreType => federate.core_type = raw.to_string(),
        FederateSetting::LogLevel => federate.log_level = raw.to_string(),
        FederateSetting::TerminateOnError => federate.terminate_on_error = parse_flag(raw)?,
        FederateSetting::SourceOnly => federate.source_only = parse_flag(raw)?,
        FederateSetting::Observer => federate.observer = parse_flag(raw)?,
        FederateSetting::OnlyUpdateOnChange => federate.only_update_on_change = parse_flag(raw)?,
        FederateSetting::Uninterruptible => federate.uninterruptible = parse_flag(raw)?,
        FederateSetting::Period => {
            let period = parse_number(raw)?;
            if period < 0.0 {
                return Err(FieldError::Malformed("a non-negative number of seconds"));
            }
            federate.period = period;
        }
    }
    Ok(())
}

/// Write `federate` as a pretty-printed JSON federate config.
pub fn write_federate_json<W: Write>(federate: &CosimulationFederate, mut out: W) -> CycoResult<()> {
    serde_json::to_writer_pretty(&mut out, federate)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::read_json;
    use crate::xml::read_xml;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hel:cosimulation xmlns:hel="http://www.helics.org">
  <hel:connect>
    <hel:publish name="P1" variable="generator_PGenPu@GEN1"/>
    <hel:publish name="P2" variable="generator_QGenPu@GEN1"/>
  </hel:connect>
  <hel:cosimulationParameters>
    <hel:parameter name="period" value="0.5"/>
    <hel:parameter name="log_level" value="Warning"/>
  </hel:cosimulationParameters>
</hel:cosimulation>
"#;

    const JSON: &str = r#"{
  "name": "Dynawo",
  "core_type": "zmq",
  "observer": false,
  "period": 0.5,
  "publications": [
    {"key": "P1", "info": "generator_PGenPu@GEN1"},
    {"key": "P2", "info": "generator_QGenPu@GEN1"}
  ],
  "subscriptions": {"key": "S1", "info": "U@BUS1"}
}"#;

    fn from_xml(text: &str) -> CycoResult<Cosimulation> {
        parse_federate(&read_xml(text).unwrap().normalize())
    }

    fn from_json(text: &str) -> CycoResult<Cosimulation> {
        parse_federate(&read_json(text, JSON_ROOT).unwrap().normalize())
    }

    #[test]
    fn both_encodings_describe_the_same_publications() {
        let xml = from_xml(XML).unwrap().power_system;
        let json = from_json(JSON).unwrap().power_system;
        assert_eq!(xml.publications, json.publications);
        assert_eq!(xml.period, 0.5);
        assert_eq!(xml.log_level, "Warning");
        assert_eq!(json.subscriptions.len(), 1);
        assert_eq!(json.subscriptions[0].info.as_deref(), Some("U@BUS1"));
    }

    #[test]
    fn unknown_parameter_name_is_rejected() {
        let err = from_xml(
            r#"<hel:cosimulation><hel:cosimulationParameters>
                 <hel:parameter name="timeout" value="3"/>
               </hel:cosimulationParameters></hel:cosimulation>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CycoError::AttributeNotFound { ref attribute, .. } if attribute == "timeout"
        ));
    }

    #[test]
    fn negative_period_is_malformed() {
        let err = from_json(r#"{"period": -1}"#).unwrap_err();
        assert!(matches!(err, CycoError::MalformedValue { .. }));
        let err = from_xml(
            r#"<hel:cosimulation><hel:cosimulationParameters>
                 <hel:parameter name="period" value="fast"/>
               </hel:cosimulationParameters></hel:cosimulation>"#,
        )
        .unwrap_err();
        assert!(matches!(err, CycoError::MalformedValue { ref attribute, .. } if attribute == "value"));
    }

    #[test]
    fn directed_publish_needs_a_known_emitter() {
        let cosim = from_xml(
            r#"<hel:cosimulation><hel:connect>
                 <hel:publish name="U" variable="U@BUS1" variable2="Uref@AVR1" bilateral="false" emitter="U@BUS1"/>
               </hel:connect></hel:cosimulation>"#,
        )
        .unwrap();
        assert_eq!(cosim.power_system.publications[0].key, "U");
        assert_eq!(cosim.power_system.subscriptions[0].info.as_deref(), Some("Uref@AVR1"));

        let err = from_xml(
            r#"<hel:cosimulation><hel:connect>
                 <hel:publish name="U" variable="U@BUS1" variable2="Uref@AVR1" bilateral="false" emitter="X@Y"/>
               </hel:connect></hel:cosimulation>"#,
        )
        .unwrap_err();
        assert!(matches!(err, CycoError::AmbiguousConnection { .. }));
    }

    #[test]
    fn two_variable_publish_is_bilateral_by_default() {
        let cosim = from_xml(
            r#"<hel:cosimulation><hel:connect>
                 <hel:publish name="U" variable="U@BUS1" variable2="Uref@AVR1"/>
                 <hel:publish name="P1" variable="P@GEN1"/>
               </hel:connect></hel:cosimulation>"#,
        )
        .unwrap();
        let keys: Vec<_> = cosim.power_system.publications.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["P1"]);
        assert!(cosim.power_system.subscriptions.is_empty());
    }

    #[test]
    fn json_output_skips_empty_lists() {
        let mut federate = CosimulationFederate::default();
        let mut buffer = Vec::new();
        write_federate_json(&federate, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(!text.contains("publications"));
        assert!(text.contains(r#""core_type": "zmq""#));

        federate.add_publication("P1", Some("P@GEN1".into()));
        let mut buffer = Vec::new();
        write_federate_json(&federate, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["publications"][0]["key"], "P1");
        assert_eq!(value["period"], 1.0);
    }

    #[test]
    fn written_json_parses_back() {
        let federate = from_json(JSON).unwrap().power_system;
        let mut buffer = Vec::new();
        write_federate_json(&federate, &mut buffer).unwrap();
        let again = from_json(std::str::from_utf8(&buffer).unwrap()).unwrap().power_system;
        assert_eq!(again, federate);
    }
}
