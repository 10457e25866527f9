//! IIDM static network schema.
//!
//! Open schema: attributes without an entry are kept in the component's
//! extension bag. Tags are still closed; an element outside [`IIDM_TAGS`]
//! is rejected.

use cyco_core::network::{
    AcLine, Bus, ComponentKind, Generator, Load, ShuntCompensator, StaticVarCompensator, Switch,
    Transformer,
};

use super::{any, on, tag, AttributeTable, TagTable};

pub const FORMAT: &str = "IIDM";
pub const PREFIX: &str = "iidm";
pub const ROOT: &str = "network";

/// Element kinds of the static network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IidmElement {
    Generic,
    Bus,
    Generator,
    Load,
    Switch,
    Shunt,
    StaticVarCompensator,
    Line,
    TwoWindingsTransformer,
}

impl IidmElement {
    /// Empty typed payload for this element kind.
    pub fn instantiate(self) -> ComponentKind {
        match self {
            IidmElement::Generic => ComponentKind::Generic,
            IidmElement::Bus => ComponentKind::Bus(Bus::default()),
            IidmElement::Generator => ComponentKind::Generator(Generator::default()),
            IidmElement::Load => ComponentKind::Load(Load::default()),
            IidmElement::Switch => ComponentKind::Switch(Switch::default()),
            IidmElement::Shunt => ComponentKind::ShuntCompensator(ShuntCompensator::default()),
            IidmElement::StaticVarCompensator => {
                ComponentKind::StaticVarCompensator(StaticVarCompensator::default())
            }
            IidmElement::Line => ComponentKind::AcLine(AcLine::default()),
            IidmElement::TwoWindingsTransformer => {
                ComponentKind::Transformer(Transformer::default())
            }
        }
    }
}

pub static IIDM_TAGS: TagTable<IidmElement> = TagTable::new(&[
    tag("network", IidmElement::Generic),
    tag("substation", IidmElement::Generic),
    tag("voltageLevel", IidmElement::Generic),
    tag("busBreakerTopology", IidmElement::Generic),
    tag("nodeBreakerTopology", IidmElement::Generic),
    tag("bus", IidmElement::Bus),
    tag("busbarSection", IidmElement::Generic),
    tag("generator", IidmElement::Generator),
    tag("reactiveCapabilityCurve", IidmElement::Generic),
    tag("point", IidmElement::Generic),
    tag("minMaxReactiveLimits", IidmElement::Generic),
    tag("load", IidmElement::Load),
    tag("switch", IidmElement::Switch),
    tag("shunt", IidmElement::Shunt),
    tag("staticVarCompensator", IidmElement::StaticVarCompensator),
    tag("line", IidmElement::Line),
    tag("twoWindingsTransformer", IidmElement::TwoWindingsTransformer),
    tag("threeWindingsTransformer", IidmElement::Generic),
    tag("phaseTapChanger", IidmElement::Generic),
    tag("ratioTapChanger", IidmElement::Generic),
    tag("terminalRef", IidmElement::Generic),
    tag("step", IidmElement::Generic),
    tag("vscConverterStation", IidmElement::Generic),
    tag("lccConverterStation", IidmElement::Generic),
    tag("hvdcLine", IidmElement::Generic),
    tag("danglingLine", IidmElement::Generic),
    tag("currentLimits", IidmElement::Generic),
    tag("currentLimits1", IidmElement::Generic),
    tag("currentLimits2", IidmElement::Generic),
    tag("currentLimit1", IidmElement::Generic),
    tag("currentLimit2", IidmElement::Generic),
    tag("temporaryLimit", IidmElement::Generic),
    tag("property", IidmElement::Generic),
    tag("internalConnection", IidmElement::Generic),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IidmField {
    Id,
    Voltage,
    PhaseAngle,
    NominalVoltage,
    Bus,
    Bus1,
    Bus2,
    ActivePowerMin,
    ActivePowerMax,
    ReactivePowerMin,
    ReactivePowerMax,
    VoltageRegulation,
    ActivePowerTarget,
    VoltageMagnitudeTarget,
    ReactivePowerTarget,
    ActivePowerOutput,
    ReactivePowerOutput,
    ActivePowerSetpoint,
    ReactivePowerSetpoint,
    RatedApparentPower,
    Open,
    VoltageLevel,
    Susceptance,
    Resistance,
    Reactance,
    HalfShuntSusceptance,
    MagnetizingSusceptance,
}

pub static IIDM_ATTRIBUTES: AttributeTable<IidmField> = AttributeTable::new(&[
    any("id", IidmField::Id),
    // bus
    on("bus", "v", IidmField::Voltage),
    on("bus", "angle", IidmField::PhaseAngle),
    on("bus", "nominalV", IidmField::NominalVoltage),
    // generator
    on("generator", "bus", IidmField::Bus),
    on("generator", "minP", IidmField::ActivePowerMin),
    on("generator", "maxP", IidmField::ActivePowerMax),
    on("generator", "minQ", IidmField::ReactivePowerMin),
    on("generator", "maxQ", IidmField::ReactivePowerMax),
    on("generator", "voltageRegulatorOn", IidmField::VoltageRegulation),
    on("generator", "targetP", IidmField::ActivePowerTarget),
    on("generator", "targetV", IidmField::VoltageMagnitudeTarget),
    on("generator", "targetQ", IidmField::ReactivePowerTarget),
    on("generator", "p", IidmField::ActivePowerOutput),
    on("generator", "q", IidmField::ReactivePowerOutput),
    on("generator", "ratedS", IidmField::RatedApparentPower),
    // load
    on("load", "bus", IidmField::Bus),
    on("load", "p0", IidmField::ActivePowerSetpoint),
    on("load", "q0", IidmField::ReactivePowerSetpoint),
    on("load", "p", IidmField::ActivePowerOutput),
    on("load", "q", IidmField::ReactivePowerOutput),
    // switch
    on("switch", "open", IidmField::Open),
    on("switch", "voltageLevel", IidmField::VoltageLevel),
    // shunt
    on("shunt", "bus", IidmField::Bus),
    on("shunt", "bPerSection", IidmField::Susceptance),
    // staticVarCompensator
    on("staticVarCompensator", "bus", IidmField::Bus),
    on(
        "staticVarCompensator",
        "reactivePowerSetPoint",
        IidmField::ReactivePowerSetpoint,
    ),
    // line
    on("line", "bus1", IidmField::Bus1),
    on("line", "bus2", IidmField::Bus2),
    on("line", "r", IidmField::Resistance),
    on("line", "x", IidmField::Reactance),
    on("line", "b1", IidmField::HalfShuntSusceptance),
    on("line", "ratedS", IidmField::RatedApparentPower),
    // twoWindingsTransformer
    on("twoWindingsTransformer", "bus1", IidmField::Bus1),
    on("twoWindingsTransformer", "bus2", IidmField::Bus2),
    on("twoWindingsTransformer", "r", IidmField::Resistance),
    on("twoWindingsTransformer", "x", IidmField::Reactance),
    on("twoWindingsTransformer", "b", IidmField::MagnetizingSusceptance),
    on("twoWindingsTransformer", "ratedS", IidmField::RatedApparentPower),
]);
