//! CRV ⇄ [`Curves`].

use cyco_core::curves::Curves;
use cyco_core::CycoResult;

use super::{
    assign_attributes, collect_attributes, expect_root, required, resolve_tag, SchemaPolicy,
};
use crate::schema::curves::{CrvElement, CrvField, CRV_ATTRIBUTES, CRV_TAGS, FORMAT, ROOT};
use crate::tree::AttributedTree;

pub fn parse_curves(tree: &AttributedTree) -> CycoResult<Curves> {
    expect_root(tree, ROOT, FORMAT)?;
    let mut curves = Curves::default();
    if let Some(namespace) = tree.attribute("xmlns") {
        curves.namespace = namespace.to_string();
    }
    assign_attributes(tree, ROOT, &CRV_ATTRIBUTES, SchemaPolicy::Closed, |_, _| Ok(()))?;

    for node in &tree.children {
        match resolve_tag(&CRV_TAGS, FORMAT, ROOT, node)? {
            CrvElement::Curve => {
                let (mut model, mut variable) = (None, None);
                assign_attributes(node, "curve", &CRV_ATTRIBUTES, SchemaPolicy::Closed, |field, raw| {
                    match field {
                        CrvField::Model => model = Some(raw.to_string()),
                        CrvField::Variable => variable = Some(raw.to_string()),
                    }
                    Ok(())
                })?;
                curves.add_curve(
                    required(model, "curve", "model")?,
                    required(variable, "curve", "variable")?,
                );
            }
        }
    }
    Ok(curves)
}

pub fn serialize_curves(curves: &Curves) -> AttributedTree {
    let mut root = AttributedTree::new(ROOT).with_attribute("xmlns", curves.namespace.as_str());
    root.children = curves
        .curves
        .iter()
        .map(|curve| AttributedTree {
            tag: "curve".to_string(),
            attributes: collect_attributes("curve", &CRV_ATTRIBUTES, |field| match field {
                CrvField::Model => Some(curve.model.clone()),
                CrvField::Variable => Some(curve.variable.clone()),
            }),
            children: Vec::new(),
        })
        .collect();
    root
}
