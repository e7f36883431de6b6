use std::fmt;

use regex::Regex;

use crate::Error;

/// Non-empty ordered sequence of build-metadata identifiers. Does not
/// affect precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    identifiers: Vec<String>,
}

impl Metadata {
    pub fn new(identifiers: Vec<String>) -> Result<Self, Error> {
        if identifiers.is_empty() {
            return Err(Error::InvalidMetadata {
                identifiers: "<empty>".to_string(),
            });
        }

        let ident_re = Regex::new(r"^[0-9A-Za-z-]+$").expect("static regex is valid");
        for id in &identifiers {
            if !ident_re.is_match(id) {
                return Err(Error::InvalidMetadata {
                    identifiers: identifiers.join("."),
                });
            }
        }

        Ok(Self { identifiers })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Standard rendering, truncating any `sha...` identifier longer than
    /// 10 characters to its first 7 hex digits. Cosmetic only — never used
    /// for persisted emission or structured serialisation.
    pub fn render_truncated(&self) -> String {
        self.identifiers
            .iter()
            .map(|id| {
                if id.starts_with("sha") && id.len() > 10 {
                    format!("sha{}", &id[3..].chars().take(7).collect::<String>())
                } else {
                    id.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifiers.join("."))
    }
}
