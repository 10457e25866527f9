//! Federate descriptor schemas (closed).
//!
//! Two encodings describe the same federate. The XML one nests connections
//! and `parameter name=... value=...` pairs under `hel:cosimulation`; the JSON
//! one is the co-simulator's own federate config, with settings as root
//! members. Setting names are shared between both, see [`FEDERATE_SETTINGS`].

use super::{on, tag_under, AttributeTable, TagTable};

pub const FORMAT: &str = "federate";
pub const XML_PREFIX: &str = "hel";
pub const XML_ROOT: &str = "cosimulation";
/// Tag given to the root object of a JSON federate config.
pub const JSON_ROOT: &str = "federate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederateElement {
    Connect,
    Publish,
    Parameters,
    Parameter,
    Publication,
    Subscription,
}

pub static FEDERATE_TAGS: TagTable<FederateElement> = TagTable::new(&[
    tag_under(XML_ROOT, "connect", FederateElement::Connect),
    tag_under("connect", "publish", FederateElement::Publish),
    tag_under(XML_ROOT, "cosimulationParameters", FederateElement::Parameters),
    tag_under("cosimulationParameters", "parameter", FederateElement::Parameter),
    tag_under(JSON_ROOT, "publications", FederateElement::Publication),
    tag_under(JSON_ROOT, "subscriptions", FederateElement::Subscription),
]);

/// Federate-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederateSetting {
    Name,
    CoreType,
    TerminateOnError,
    SourceOnly,
    Observer,
    OnlyUpdateOnChange,
    LogLevel,
    Uninterruptible,
    Period,
}

pub static FEDERATE_SETTINGS: AttributeTable<FederateSetting> = AttributeTable::new(&[
    on(JSON_ROOT, "name", FederateSetting::Name),
    on(JSON_ROOT, "core_type", FederateSetting::CoreType),
    on(JSON_ROOT, "terminate_on_error", FederateSetting::TerminateOnError),
    on(JSON_ROOT, "source_only", FederateSetting::SourceOnly),
    on(JSON_ROOT, "observer", FederateSetting::Observer),
    on(
        JSON_ROOT,
        "only_update_on_change",
        FederateSetting::OnlyUpdateOnChange,
    ),
    on(JSON_ROOT, "log_level", FederateSetting::LogLevel),
    on(JSON_ROOT, "uninterruptible", FederateSetting::Uninterruptible),
    on(JSON_ROOT, "period", FederateSetting::Period),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederateField {
    ConnectionName,
    Variable,
    Variable2,
    Bilateral,
    Emitter,
    ParameterName,
    ParameterValue,
    Key,
    Info,
}

pub static FEDERATE_ATTRIBUTES: AttributeTable<FederateField> = AttributeTable::new(&[
    on("publish", "name", FederateField::ConnectionName),
    on("publish", "variable", FederateField::Variable),
    on("publish", "variable2", FederateField::Variable2),
    on("publish", "bilateral", FederateField::Bilateral),
    on("publish", "emitter", FederateField::Emitter),
    on("parameter", "name", FederateField::ParameterName),
    on("parameter", "value", FederateField::ParameterValue),
    on("publications", "key", FederateField::Key),
    on("publications", "info", FederateField::Info),
    on("subscriptions", "key", FederateField::Key),
    on("subscriptions", "info", FederateField::Info),
]);
