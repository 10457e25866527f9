//! PAR parameter set schema (closed).

use super::{on, tag_under, AttributeTable, TagTable};

pub const FORMAT: &str = "PAR";
pub const ROOT: &str = "parametersSet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParElement {
    Set,
    Par,
    Reference,
}

pub static PAR_TAGS: TagTable<ParElement> = TagTable::new(&[
    tag_under(ROOT, "set", ParElement::Set),
    tag_under("set", "par", ParElement::Par),
    tag_under("set", "reference", ParElement::Reference),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParField {
    Id,
    Type,
    Name,
    Value,
    OriginData,
    OriginName,
    ComponentId,
}

pub static PAR_ATTRIBUTES: AttributeTable<ParField> = AttributeTable::new(&[
    on("set", "id", ParField::Id),
    on("par", "type", ParField::Type),
    on("par", "name", ParField::Name),
    on("par", "value", ParField::Value),
    on("reference", "type", ParField::Type),
    on("reference", "name", ParField::Name),
    on("reference", "origData", ParField::OriginData),
    on("reference", "origName", ParField::OriginName),
    on("reference", "componentId", ParField::ComponentId),
]);
