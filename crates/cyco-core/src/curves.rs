//! Output curve list.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURVES_NAMESPACE: &str = "http://www.rte-france.com/dynawo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curves {
    /// Namespace declared on the document root
    pub namespace: String,
    pub curves: Vec<Curve>,
}

impl Default for Curves {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_CURVES_NAMESPACE.to_string(),
            curves: Vec::new(),
        }
    }
}

/// One variable of one model to record during the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    pub model: String,
    pub variable: String,
}

impl Curves {
    pub fn add_curve(&mut self, model: impl Into<String>, variable: impl Into<String>) {
        self.curves.push(Curve {
            model: model.into(),
            variable: variable.into(),
        });
    }
}
