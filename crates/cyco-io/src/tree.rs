//! Generic attributed tree.
//!
//! Readers produce a [`RawTree`], where a repeated child may appear either as
//! individual elements or as one [`RawNode::Repeated`] group (JSON arrays).
//! [`RawTree::normalize`] flattens groups into one element per occurrence and
//! yields an [`AttributedTree`], the only shape the mapper accepts.

/// Tree as produced by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTree {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    Element(RawTree),
    /// Several occurrences of one tag presented as a single group
    Repeated(Vec<RawTree>),
}

impl RawTree {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn normalize(self) -> AttributedTree {
        let mut children = Vec::with_capacity(self.children.len());
        for node in self.children {
            match node {
                RawNode::Element(tree) => children.push(tree.normalize()),
                RawNode::Repeated(group) => {
                    children.extend(group.into_iter().map(RawTree::normalize))
                }
            }
        }
        AttributedTree {
            tag: self.tag,
            attributes: self.attributes,
            children,
        }
    }
}

/// Normalized tree: each child is one occurrence, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedTree {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<AttributedTree>,
}

impl AttributedTree {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: AttributedTree) -> Self {
        self.children.push(child);
        self
    }

    /// Tag without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a AttributedTree> {
        self.children.iter().filter(move |c| c.local_name() == local)
    }
}

pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map(|(_, local)| local)
        .unwrap_or(qualified)
}

/// `xmlns` and `xmlns:*` attributes.
pub fn is_namespace_declaration(attribute: &str) -> bool {
    attribute == "xmlns" || attribute.starts_with("xmlns:")
}
