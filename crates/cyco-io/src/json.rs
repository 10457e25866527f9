//! JSON text → attributed tree.
//!
//! Scalar members become attributes, object members become child elements and
//! array members become [`RawNode::Repeated`] groups of elements tagged with
//! the member name. `null` members are treated as absent.

use cyco_core::{CycoError, CycoResult};
use serde_json::Value;

use crate::tree::{RawNode, RawTree};

/// Parse a JSON document whose top level is an object.
pub fn read_json(text: &str, root_tag: &str) -> CycoResult<RawTree> {
    let value: Value = serde_json::from_str(text)?;
    value_to_tree(root_tag, &value)
}

pub fn value_to_tree(tag: &str, value: &Value) -> CycoResult<RawTree> {
    let Value::Object(members) = value else {
        return Err(CycoError::malformed(tag, tag, value.to_string(), "a JSON object"));
    };

    let mut tree = RawTree::new(tag);
    for (name, member) in members {
        match member {
            Value::Null => {}
            Value::Object(_) => tree
                .children
                .push(RawNode::Element(value_to_tree(name, member)?)),
            Value::Array(items) => {
                let group = items
                    .iter()
                    .map(|item| value_to_tree(name, item))
                    .collect::<CycoResult<Vec<_>>>()?;
                tree.children.push(RawNode::Repeated(group));
            }
            Value::String(s) => tree.attributes.push((name.clone(), s.clone())),
            Value::Bool(_) | Value::Number(_) => {
                tree.attributes.push((name.clone(), member.to_string()))
            }
        }
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_become_attributes() {
        let tree = read_json(
            r#"{"name": "Dynawo", "period": 0.5, "observer": false, "log_level": null}"#,
            "federate",
        )
        .unwrap()
        .normalize();
        assert_eq!(tree.tag, "federate");
        assert_eq!(tree.attribute("name"), Some("Dynawo"));
        assert_eq!(tree.attribute("period"), Some("0.5"));
        assert_eq!(tree.attribute("observer"), Some("false"));
        assert_eq!(tree.attribute("log_level"), None);
    }

    #[test]
    fn arrays_and_single_objects_normalize_alike() {
        let listed = read_json(r#"{"publications": [{"key": "P1", "info": "P@G"}]}"#, "f")
            .unwrap()
            .normalize();
        let single = read_json(r#"{"publications": {"key": "P1", "info": "P@G"}}"#, "f")
            .unwrap()
            .normalize();
        assert_eq!(listed, single);
        assert_eq!(listed.children[0].tag, "publications");
    }

    #[test]
    fn rejects_scalar_list_items() {
        let err = read_json(r#"{"publications": ["P1"]}"#, "f").unwrap_err();
        assert!(matches!(err, CycoError::MalformedValue { .. }));
        assert!(matches!(read_json("{", "f"), Err(CycoError::Json(_))));
    }
}
