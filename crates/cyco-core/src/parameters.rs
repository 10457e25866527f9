//! Parameter sets.
//!
//! A parameter set is a named bag of typed parameters and external references.
//! Names are unique within a set: adding a parameter whose name already exists
//! replaces the previous one (last write wins) and keeps its position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterType {
    Double,
    Bool,
    Int,
    String,
}

impl ParameterType {
    pub const ALL: &'static [ParameterType] = &[
        ParameterType::Double,
        ParameterType::Bool,
        ParameterType::Int,
        ParameterType::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Double => "DOUBLE",
            ParameterType::Bool => "BOOL",
            ParameterType::Int => "INT",
            ParameterType::String => "STRING",
        }
    }

    /// Check that `value` is a valid literal for this type.
    ///
    /// Returns the expected-type description on failure.
    pub fn validate(&self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            ParameterType::Double => value.trim().parse::<f64>().is_ok(),
            ParameterType::Int => value.trim().parse::<i64>().is_ok(),
            ParameterType::Bool => matches!(value.trim(), "true" | "false"),
            ParameterType::String => true,
        };
        if ok {
            Ok(())
        } else {
            Err(match self {
                ParameterType::Double => "a floating-point number",
                ParameterType::Int => "an integer",
                ParameterType::Bool => "'true' or 'false'",
                ParameterType::String => "a string",
            })
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or("one of DOUBLE, BOOL, INT, STRING")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterType,
    /// Literal value as written in the parameter file
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }
}

/// A parameter whose value is read from another data source at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub kind: ParameterType,
    pub origin_data_source: String,
    pub origin_name: String,
    pub component_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub id: String,
    parameters: Vec<Parameter>,
    references: Vec<Reference>,
}

impl ParameterSet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Add a parameter, replacing any parameter with the same name.
    pub fn add_parameter(&mut self, parameter: Parameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.parameters.push(parameter),
        }
    }

    /// Add a reference, replacing any reference with the same name.
    pub fn add_reference(&mut self, reference: Reference) {
        match self.references.iter_mut().find(|r| r.name == reference.name) {
            Some(existing) => *existing = reference,
            None => self.references.push(reference),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn reference(&self, name: &str) -> Option<&Reference> {
        self.references.iter().find(|r| r.name == name)
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_keeps_position() {
        let mut set = ParameterSet::new("GEN1");
        set.add_parameter(Parameter::new("gen_H", ParameterType::Double, "5.4"));
        set.add_parameter(Parameter::new("gen_DPu", ParameterType::Double, "0"));
        set.add_parameter(Parameter::new("gen_H", ParameterType::Double, "6.3"));

        let names: Vec<_> = set.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["gen_H", "gen_DPu"]);
        assert_eq!(set.parameter("gen_H").unwrap().value, "6.3");
    }

    #[test]
    fn references_are_keyed_by_name() {
        let mut set = ParameterSet::new("LOAD");
        let reference = |source: &str| Reference {
            name: "load_P0Pu".into(),
            kind: ParameterType::Double,
            origin_data_source: source.into(),
            origin_name: "p_pu".into(),
            component_id: None,
        };
        set.add_reference(reference("IIDM"));
        set.add_reference(reference("PAR"));
        assert_eq!(set.references().len(), 1);
        assert_eq!(set.reference("load_P0Pu").unwrap().origin_data_source, "PAR");
    }

    #[test]
    fn type_validation() {
        assert!(ParameterType::Double.validate("1e-5").is_ok());
        assert!(ParameterType::Int.validate("3").is_ok());
        assert!(ParameterType::Int.validate("3.5").is_err());
        assert!(ParameterType::Bool.validate("true").is_ok());
        assert!(ParameterType::Bool.validate("yes").is_err());
        assert!(ParameterType::String.validate("anything").is_ok());
    }

    #[test]
    fn type_from_str() {
        assert_eq!("DOUBLE".parse::<ParameterType>(), Ok(ParameterType::Double));
        assert_eq!("STRING".parse::<ParameterType>(), Ok(ParameterType::String));
        assert!("double".parse::<ParameterType>().is_err());
    }
}
