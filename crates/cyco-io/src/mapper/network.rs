//! IIDM ⇄ [`Component`] tree.

use cyco_core::network::{Component, ComponentKind};
use cyco_core::CycoResult;
use tracing::debug;

use super::{
    assign_attributes, collect_attributes, expect_root, prefixed, resolve_tag, FieldError,
    SchemaPolicy, Slot,
};
use crate::schema::network::{IidmField, FORMAT, IIDM_ATTRIBUTES, IIDM_TAGS, PREFIX, ROOT};
use crate::tree::AttributedTree;

pub fn parse_network(tree: &AttributedTree) -> CycoResult<Component> {
    expect_root(tree, ROOT, FORMAT)?;
    let network = parse_component(tree, ROOT)?;
    debug!(
        id = network.id.as_deref().unwrap_or_default(),
        components = network.count(),
        "parsed static network"
    );
    Ok(network)
}

fn parse_component(node: &AttributedTree, parent: &str) -> CycoResult<Component> {
    let tag = node.local_name();
    let element = resolve_tag(&IIDM_TAGS, FORMAT, parent, node)?;
    let mut component = Component::new(tag, element.instantiate());

    let unmapped = assign_attributes(
        node,
        tag,
        &IIDM_ATTRIBUTES,
        SchemaPolicy::Open,
        |field, raw| match field {
            IidmField::Id => {
                component.id = Some(raw.to_string());
                Ok(())
            }
            _ => slot(&mut component.kind, field)
                .ok_or(FieldError::NotApplicable)?
                .assign(raw),
        },
    )?;
    component.extension = unmapped.into_iter().collect();

    for child in &node.children {
        component.add_child(parse_component(child, tag)?);
    }
    Ok(component)
}

pub fn serialize_network(network: &Component) -> AttributedTree {
    let mut kind = network.kind.clone();
    let mut attributes = collect_attributes(&network.tag, &IIDM_ATTRIBUTES, |field| match field {
        IidmField::Id => network.id.clone(),
        _ => slot(&mut kind, field).and_then(Slot::render),
    });
    attributes.extend(
        network
            .extension
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    );

    AttributedTree {
        tag: prefixed(PREFIX, &network.tag),
        attributes,
        children: network.children.iter().map(serialize_network).collect(),
    }
}

fn slot(kind: &mut ComponentKind, field: IidmField) -> Option<Slot<'_>> {
    use IidmField as F;

    let slot = match (kind, field) {
        (ComponentKind::Bus(bus), F::Voltage) => Slot::Number(&mut bus.voltage),
        (ComponentKind::Bus(bus), F::PhaseAngle) => Slot::Number(&mut bus.phase_angle),
        (ComponentKind::Bus(bus), F::NominalVoltage) => Slot::Number(&mut bus.nominal_voltage),

        (ComponentKind::Generator(gen), F::Bus) => Slot::Text(&mut gen.bus),
        (ComponentKind::Generator(gen), F::ActivePowerMin) => {
            Slot::Number(&mut gen.active_power_min)
        }
        (ComponentKind::Generator(gen), F::ActivePowerMax) => {
            Slot::Number(&mut gen.active_power_max)
        }
        (ComponentKind::Generator(gen), F::ReactivePowerMin) => {
            Slot::Number(&mut gen.reactive_power_min)
        }
        (ComponentKind::Generator(gen), F::ReactivePowerMax) => {
            Slot::Number(&mut gen.reactive_power_max)
        }
        (ComponentKind::Generator(gen), F::VoltageRegulation) => {
            Slot::Flag(&mut gen.voltage_regulation)
        }
        (ComponentKind::Generator(gen), F::ActivePowerTarget) => {
            Slot::Number(&mut gen.active_power_target)
        }
        (ComponentKind::Generator(gen), F::VoltageMagnitudeTarget) => {
            Slot::Number(&mut gen.voltage_magnitude_target)
        }
        (ComponentKind::Generator(gen), F::ReactivePowerTarget) => {
            Slot::Number(&mut gen.reactive_power_target)
        }
        (ComponentKind::Generator(gen), F::ActivePowerOutput) => {
            Slot::Number(&mut gen.active_power_output)
        }
        (ComponentKind::Generator(gen), F::ReactivePowerOutput) => {
            Slot::Number(&mut gen.reactive_power_output)
        }
        (ComponentKind::Generator(gen), F::RatedApparentPower) => {
            Slot::Number(&mut gen.rated_apparent_power)
        }

        (ComponentKind::Load(load), F::Bus) => Slot::Text(&mut load.bus),
        (ComponentKind::Load(load), F::ActivePowerSetpoint) => {
            Slot::Number(&mut load.active_power_setpoint)
        }
        (ComponentKind::Load(load), F::ReactivePowerSetpoint) => {
            Slot::Number(&mut load.reactive_power_setpoint)
        }
        (ComponentKind::Load(load), F::ActivePowerOutput) => {
            Slot::Number(&mut load.active_power_output)
        }
        (ComponentKind::Load(load), F::ReactivePowerOutput) => {
            Slot::Number(&mut load.reactive_power_output)
        }

        (ComponentKind::Switch(switch), F::Open) => Slot::Flag(&mut switch.is_open),
        (ComponentKind::Switch(switch), F::VoltageLevel) => Slot::Text(&mut switch.voltage_level),

        (ComponentKind::ShuntCompensator(shunt), F::Bus) => Slot::Text(&mut shunt.bus),
        (ComponentKind::ShuntCompensator(shunt), F::Susceptance) => {
            Slot::Number(&mut shunt.susceptance)
        }

        (ComponentKind::StaticVarCompensator(svc), F::Bus) => Slot::Text(&mut svc.bus),
        (ComponentKind::StaticVarCompensator(svc), F::ReactivePowerSetpoint) => {
            Slot::Number(&mut svc.reactive_power_setpoint)
        }

        (ComponentKind::AcLine(line), F::Bus1) => Slot::Text(&mut line.bus_1),
        (ComponentKind::AcLine(line), F::Bus2) => Slot::Text(&mut line.bus_2),
        (ComponentKind::AcLine(line), F::Resistance) => Slot::Number(&mut line.resistance),
        (ComponentKind::AcLine(line), F::Reactance) => Slot::Number(&mut line.reactance),
        (ComponentKind::AcLine(line), F::HalfShuntSusceptance) => {
            Slot::Number(&mut line.half_shunt_susceptance)
        }
        (ComponentKind::AcLine(line), F::RatedApparentPower) => {
            Slot::Number(&mut line.rated_apparent_power)
        }

        (ComponentKind::Transformer(tr), F::Bus1) => Slot::Text(&mut tr.bus_1),
        (ComponentKind::Transformer(tr), F::Bus2) => Slot::Text(&mut tr.bus_2),
        (ComponentKind::Transformer(tr), F::Resistance) => Slot::Number(&mut tr.resistance),
        (ComponentKind::Transformer(tr), F::Reactance) => Slot::Number(&mut tr.reactance),
        (ComponentKind::Transformer(tr), F::MagnetizingSusceptance) => {
            Slot::Number(&mut tr.magnetizing_susceptance)
        }
        (ComponentKind::Transformer(tr), F::RatedApparentPower) => {
            Slot::Number(&mut tr.rated_apparent_power)
        }

        _ => return None,
    };
    Some(slot)
}
