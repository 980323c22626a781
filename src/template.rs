//! # Template Engine
//!
//! Substitutes `{{name}}` placeholders in authored text.
//!
//! * `hscode`, `subheading`, `heading` and `chapter` are derived from the
//!   `hscode` variable and rendered as code phrases (see [`HsLevel`]).
//! * Any other name is looked up in [`TemplateVars`] as is, without trimming.
//!
//! A placeholder with no value, or with an empty value, is left in the text
//! verbatim and reported as a [`TemplateWarning`]; rendering never fails.

use std::{collections::BTreeMap, fmt, str::FromStr};

use nom::{
    bytes::complete::{tag, take_while1},
    sequence::delimited,
    IResult,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::formatter::hscode::HsLevel;

/// Variables available to templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables holding just the `hscode` of the product.
    pub fn with_hscode(hscode: impl Into<String>) -> Self {
        let mut vars = Self::new();
        vars.set("hscode", hscode);
        vars
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn hscode(&self) -> Option<&str> {
        self.get("hscode")
    }

    /// A copy with `name` set to `value`, or unset when `value` is `None`.
    pub fn scoped(&self, name: &str, value: Option<&str>) -> Self {
        let mut vars = self.clone();
        match value {
            Some(value) => {
                vars.set(name, value);
            }
            None => {
                vars.remove(name);
            }
        }
        vars
    }

    fn resolve(&self, name: &str) -> Option<String> {
        let value = match HsLevel::from_str(name) {
            Ok(level) => self.hscode().map(|hscode| level.format(hscode)),
            Err(_) => self.get(name).map(str::to_string),
        };
        value.filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A placeholder that could not be substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateWarning {
    pub variable: String,
    pub template: String,
}

impl fmt::Display for TemplateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "variable {} could not be set in `{}`",
            self.variable, self.template
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<TemplateWarning>,
}

fn placeholder(input: &str) -> IResult<&str, &str> {
    delimited(tag("{{"), take_while1(|c| c != '}'), tag("}}"))(input)
}

/// Renders `template` against `vars`.
///
/// ```
/// use tariff_psr::template::{render, TemplateVars};
///
/// let vars = TemplateVars::with_hscode("0304.41");
/// let rendered = render("For {{hscode}}, see {{heading}} and {{missing}}.", &vars);
/// assert_eq!(rendered.text, "For subheading 0304.41, see heading 0304 and {{missing}}.");
/// assert_eq!(rendered.warnings[0].variable, "missing");
/// ```
pub fn render(template: &str, vars: &TemplateVars) -> Rendered {
    let mut text = String::with_capacity(template.len());
    let mut warnings: Vec<TemplateWarning> = Vec::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if c == '{' {
            if let Ok((remaining, name)) = placeholder(rest) {
                let raw = &rest[..rest.len() - remaining.len()];
                match vars.resolve(name) {
                    Some(value) => text.push_str(&value),
                    None => {
                        text.push_str(raw);
                        if !warnings.iter().any(|w| w.variable == name) {
                            let warning = TemplateWarning {
                                variable: name.to_string(),
                                template: template.to_string(),
                            };
                            warn!("{}", warning);
                            warnings.push(warning);
                        }
                    }
                }
                rest = remaining;
                continue;
            }
        }
        text.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Rendered { text, warnings }
}
