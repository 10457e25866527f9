//! DYD dynamic model schema (closed).
//!
//! `connect` is resolved by its parent: under `macroConnector` it is a
//! template pin, directly under the root it is a direct connection. The
//! attribute context of each element is [`DydElement::context`], so the two
//! `connect` flavours own different attribute sets.

use super::{on, tag_under, AttributeTable, TagTable};

pub const FORMAT: &str = "DYD";
pub const PREFIX: &str = "dyn";
pub const ROOT: &str = "dynamicModelsArchitecture";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DydElement {
    BlackBoxModel,
    StaticRef,
    MacroConnector,
    TemplateConnect,
    MacroConnect,
    Connect,
}

impl DydElement {
    pub fn tag(self) -> &'static str {
        match self {
            DydElement::BlackBoxModel => "blackBoxModel",
            DydElement::StaticRef => "staticRef",
            DydElement::MacroConnector => "macroConnector",
            DydElement::TemplateConnect | DydElement::Connect => "connect",
            DydElement::MacroConnect => "macroConnect",
        }
    }

    /// Attribute context; tells the two `connect` flavours apart.
    pub fn context(self) -> &'static str {
        match self {
            DydElement::BlackBoxModel => "blackBoxModel",
            DydElement::StaticRef => "staticRef",
            DydElement::MacroConnector => "macroConnector",
            DydElement::TemplateConnect => "macroConnector/connect",
            DydElement::MacroConnect => "macroConnect",
            DydElement::Connect => "connect",
        }
    }
}

pub static DYD_TAGS: TagTable<DydElement> = TagTable::new(&[
    tag_under(ROOT, "blackBoxModel", DydElement::BlackBoxModel),
    tag_under("blackBoxModel", "staticRef", DydElement::StaticRef),
    tag_under(ROOT, "macroConnector", DydElement::MacroConnector),
    tag_under("macroConnector", "connect", DydElement::TemplateConnect),
    tag_under(ROOT, "macroConnect", DydElement::MacroConnect),
    tag_under(ROOT, "connect", DydElement::Connect),
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DydField {
    Id,
    Library,
    ParameterFile,
    ParameterId,
    StaticId,
    Variable,
    StaticVariable,
    Connector,
    Id1,
    Index1,
    Id2,
    Index2,
    Name1,
    Name2,
    Variable1,
    Variable2,
}

pub static DYD_ATTRIBUTES: AttributeTable<DydField> = AttributeTable::new(&[
    on("blackBoxModel", "id", DydField::Id),
    on("blackBoxModel", "lib", DydField::Library),
    on("blackBoxModel", "parFile", DydField::ParameterFile),
    on("blackBoxModel", "parId", DydField::ParameterId),
    on("blackBoxModel", "staticId", DydField::StaticId),
    on("staticRef", "var", DydField::Variable),
    on("staticRef", "staticVar", DydField::StaticVariable),
    on("macroConnector", "id", DydField::Id),
    on("macroConnector/connect", "var1", DydField::Variable1),
    on("macroConnector/connect", "var2", DydField::Variable2),
    on("macroConnect", "connector", DydField::Connector),
    on("macroConnect", "id1", DydField::Id1),
    on("macroConnect", "index1", DydField::Index1),
    on("macroConnect", "id2", DydField::Id2),
    on("macroConnect", "index2", DydField::Index2),
    on("macroConnect", "name1", DydField::Name1),
    on("macroConnect", "name2", DydField::Name2),
    on("connect", "id1", DydField::Id1),
    on("connect", "var1", DydField::Variable1),
    on("connect", "id2", DydField::Id2),
    on("connect", "var2", DydField::Variable2),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_depends_on_parent() {
        assert_eq!(
            DYD_TAGS.resolve("macroConnector", "connect"),
            Some(DydElement::TemplateConnect)
        );
        assert_eq!(DYD_TAGS.resolve(ROOT, "connect"), Some(DydElement::Connect));
        assert_eq!(DYD_TAGS.resolve(ROOT, "staticRef"), None);
    }

    #[test]
    fn template_pins_have_no_model_ids() {
        let ctx = DydElement::TemplateConnect.context();
        assert_eq!(DYD_ATTRIBUTES.resolve(ctx, "var1"), Some(DydField::Variable1));
        assert_eq!(DYD_ATTRIBUTES.resolve(ctx, "id1"), None);
        assert_eq!(
            DYD_ATTRIBUTES.resolve(DydElement::Connect.context(), "id1"),
            Some(DydField::Id1)
        );
    }
}
