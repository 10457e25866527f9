//! Static schema tables.
//!
//! Each document format is described by data, not code:
//!
//! - a [`TagTable`] resolving `(enclosing tag, tag)` to the element kind to
//!   build,
//! - an [`AttributeTable`] resolving `(context, attribute)` to a typed field.
//!
//! Context-sensitive entries let one attribute name map to different fields
//! depending on where it appears (`parFile` under `solver` vs under
//! `network`). Entries declared for [`Context::Any`] apply everywhere unless a
//! context-specific entry shadows them. Declaration order is the order in
//! which typed attributes are written back.

/// Namespace of the Dynawo input formats.
pub const DYNAWO_NAMESPACE: &str = "http://www.rte-france.com/dynawo";

pub mod curves;
pub mod dynamic;
pub mod federate;
pub mod jobs;
pub mod network;
pub mod parameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Any,
    Tag(&'static str),
}

impl Context {
    fn matches(&self, context: &str) -> bool {
        match self {
            Context::Any => true,
            Context::Tag(tag) => *tag == context,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttributeEntry<F: 'static> {
    pub context: Context,
    pub attribute: &'static str,
    pub field: F,
}

/// Entry valid in every context.
pub const fn any<F>(attribute: &'static str, field: F) -> AttributeEntry<F> {
    AttributeEntry {
        context: Context::Any,
        attribute,
        field,
    }
}

/// Entry valid under one context only.
pub const fn on<F>(context: &'static str, attribute: &'static str, field: F) -> AttributeEntry<F> {
    AttributeEntry {
        context: Context::Tag(context),
        attribute,
        field,
    }
}

#[derive(Debug)]
pub struct AttributeTable<F: 'static> {
    entries: &'static [AttributeEntry<F>],
}

impl<F: Copy> AttributeTable<F> {
    pub const fn new(entries: &'static [AttributeEntry<F>]) -> Self {
        Self { entries }
    }

    /// Field for `attribute` under `context`; context-specific entries win.
    pub fn resolve(&self, context: &str, attribute: &str) -> Option<F> {
        let mut fallback = None;
        for entry in self.entries {
            if entry.attribute != attribute {
                continue;
            }
            match entry.context {
                Context::Tag(tag) if tag == context => return Some(entry.field),
                Context::Any if fallback.is_none() => fallback = Some(entry.field),
                _ => {}
            }
        }
        fallback
    }

    /// Attributes valid under `context`, in declaration order.
    pub fn fields_for<'a>(
        &'a self,
        context: &'a str,
    ) -> impl Iterator<Item = (&'static str, F)> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.context.matches(context))
            .filter(move |entry| {
                entry.context != Context::Any
                    || !self.entries.iter().any(|other| {
                        other.attribute == entry.attribute
                            && matches!(other.context, Context::Tag(tag) if tag == context)
                    })
            })
            .map(|entry| (entry.attribute, entry.field))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TagEntry<T: 'static> {
    pub parent: Context,
    pub tag: &'static str,
    pub kind: T,
}

pub const fn tag<T>(tag: &'static str, kind: T) -> TagEntry<T> {
    TagEntry {
        parent: Context::Any,
        tag,
        kind,
    }
}

pub const fn tag_under<T>(parent: &'static str, tag: &'static str, kind: T) -> TagEntry<T> {
    TagEntry {
        parent: Context::Tag(parent),
        tag,
        kind,
    }
}

#[derive(Debug)]
pub struct TagTable<T: 'static> {
    entries: &'static [TagEntry<T>],
}

impl<T: Copy + PartialEq> TagTable<T> {
    pub const fn new(entries: &'static [TagEntry<T>]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, parent: &str, tag: &str) -> Option<T> {
        self.entries
            .iter()
            .filter(|entry| entry.tag == tag)
            .find(|entry| entry.parent.matches(parent))
            .map(|entry| entry.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Id,
        SolverFile,
        NetworkFile,
        Name,
    }

    static TABLE: AttributeTable<Field> = AttributeTable::new(&[
        any("id", Field::Id),
        on("solver", "parFile", Field::SolverFile),
        on("network", "parFile", Field::NetworkFile),
        any("name", Field::Name),
        on("job", "name", Field::Id),
    ]);

    #[test]
    fn context_specific_entries_win() {
        assert_eq!(TABLE.resolve("solver", "parFile"), Some(Field::SolverFile));
        assert_eq!(TABLE.resolve("network", "parFile"), Some(Field::NetworkFile));
        assert_eq!(TABLE.resolve("modeler", "parFile"), None);
        assert_eq!(TABLE.resolve("anything", "id"), Some(Field::Id));
        assert_eq!(TABLE.resolve("job", "name"), Some(Field::Id));
        assert_eq!(TABLE.resolve("other", "name"), Some(Field::Name));
    }

    #[test]
    fn fields_for_skips_shadowed_entries() {
        let job: Vec<_> = TABLE.fields_for("job").collect();
        assert_eq!(job, vec![("id", Field::Id), ("name", Field::Id)]);
        let solver: Vec<_> = TABLE.fields_for("solver").map(|(a, _)| a).collect();
        assert_eq!(solver, vec!["id", "parFile", "name"]);
    }

    #[test]
    fn fields_for_accepts_a_borrowed_context() {
        let context = String::from("network");
        let fields: Vec<_> = TABLE.fields_for(&context).collect();
        assert_eq!(
            fields,
            vec![("id", Field::Id), ("parFile", Field::NetworkFile), ("name", Field::Name)]
        );
    }

    #[test]
    fn tags_resolve_by_parent() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Kind {
            Template,
            Direct,
        }
        static TAGS: TagTable<Kind> = TagTable::new(&[
            tag_under("macroConnector", "connect", Kind::Template),
            tag_under("dynamicModelsArchitecture", "connect", Kind::Direct),
        ]);
        assert_eq!(TAGS.resolve("macroConnector", "connect"), Some(Kind::Template));
        assert_eq!(
            TAGS.resolve("dynamicModelsArchitecture", "connect"),
            Some(Kind::Direct)
        );
        assert_eq!(TAGS.resolve("blackBoxModel", "connect"), None);
    }
}
