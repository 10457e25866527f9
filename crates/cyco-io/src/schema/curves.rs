//! CRV curve list schema (closed).

use super::{on, tag_under, AttributeTable, TagTable};

pub const FORMAT: &str = "CRV";
pub const ROOT: &str = "curvesInput";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrvElement {
    Curve,
}

pub static CRV_TAGS: TagTable<CrvElement> =
    TagTable::new(&[tag_under(ROOT, "curve", CrvElement::Curve)]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrvField {
    Model,
    Variable,
}

pub static CRV_ATTRIBUTES: AttributeTable<CrvField> = AttributeTable::new(&[
    on("curve", "model", CrvField::Model),
    on("curve", "variable", CrvField::Variable),
]);
