//! Municipality classification of decoded features.
//!
//! A [`PropertyRule`] looks up one value in a feature's `properties`: an exact
//! property name is preferred, then the first property (in document order)
//! whose name matches a case-insensitive pattern. Truthiness and text coercion
//! follow JavaScript semantics, since the census exports mix numeric and string
//! codes.

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

/// Grouping key and display name derived from one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub code: String,
    pub name: String,
}

/// Pluggable policy deriving a [`Classification`] from a decoded feature.
pub trait Classifier {
    /// Return the grouping key and display name, or `None` if the feature has no key.
    fn classify(&self, feature: &Value) -> Option<Classification>;
}

/// Exact-name-then-pattern property lookup.
#[derive(Debug, Clone)]
pub struct PropertyRule {
    exact: String,
    pattern: Regex,
}

impl PropertyRule {
    /// Build a rule; `pattern` is matched case-insensitively against property names.
    pub fn new(exact: &str, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            exact: exact.to_string(),
            pattern,
        })
    }

    /// Resolve the rule against a property map. Empty when nothing truthy is found.
    #[must_use]
    pub fn resolve(&self, props: &Map<String, Value>) -> String {
        if let Some(value) = props.get(&self.exact)
            && is_truthy(value)
        {
            return coerce_text(value);
        }

        props
            .iter()
            .find(|(key, _)| self.pattern.is_match(key))
            .filter(|(_, value)| is_truthy(value))
            .map(|(_, value)| coerce_text(value))
            .unwrap_or_default()
    }
}

/// Default classifier for IBGE census tracts (`CD_MUN` / `NM_MUN`).
#[derive(Debug, Clone)]
pub struct MunicipalityClassifier {
    code: PropertyRule,
    name: PropertyRule,
}

impl MunicipalityClassifier {
    /// Classifier using `CD_MUN` for the code and `NM_MUN` for the name.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            code: PropertyRule::new("CD_MUN", "CD.*MUN|MUN.*CD")?,
            name: PropertyRule::new("NM_MUN", "NM.*MUN|MUN.*NM")?,
        })
    }

    /// Classifier using custom rules for the code and the name.
    #[must_use]
    pub fn with_rules(code: PropertyRule, name: PropertyRule) -> Self {
        Self { code, name }
    }
}

impl Classifier for MunicipalityClassifier {
    fn classify(&self, feature: &Value) -> Option<Classification> {
        let props = feature.get("properties")?.as_object()?;

        let code = self.code.resolve(props);
        if code.is_empty() {
            return None;
        }

        let name = self.name.resolve(props);
        Some(Classification { code, name })
    }
}

/// JavaScript truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a property value as text.
///
/// Integral floats drop their fraction (`3106200.0` becomes `3106200`) so that
/// numeric and string codes name the same municipality.
#[must_use]
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_f64()
                && let Some(f) = n.as_f64()
                && f.is_finite()
                && f.fract() == 0.0
                && f.abs() < 9.0e15
            {
                #[allow(clippy::cast_possible_truncation)]
                let integral = f as i64;
                return integral.to_string();
            }
            n.to_string()
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
