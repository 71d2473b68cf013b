// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-supplied variables for report templates.
//!
//! Variables are passed in as a comma-separated list of `key:value` or `key=value` pairs, for
//! example `version:1.2.4,build=42`. They are attached to a [`RunResult`](crate::result::RunResult) and
//! exposed to templates as `vars`, but are otherwise opaque.

use crate::errors::{VariablesParseError, VariablesParseErrorKind};
use indexmap::IndexMap;
use serde::Serialize;
use std::str::FromStr;

/// The separators accepted between a key and its value.
const SEPARATORS: [char; 2] = [':', '='];

/// A map of template variables, in the order they were specified.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateVars {
    vars: IndexMap<String, String>,
}

impl TemplateVars {
    /// Creates an empty set of variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over the variables in the order they were specified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for TemplateVars {
    type Err = VariablesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut vars = IndexMap::new();
        // Empty items (e.g. "a:1,,b:2" or a trailing comma) are ignored.
        for item in s.split(',').filter(|item| !item.is_empty()) {
            let mut parts = item.split(SEPARATORS);
            // First "next" always returns a value.
            let key = parts.next().expect("split should have at least 1 element");
            let (Some(value), None) = (parts.next(), parts.next()) else {
                return Err(VariablesParseError::new(
                    item,
                    VariablesParseErrorKind::ExpectedOneSeparator,
                ));
            };

            if key.is_empty() {
                return Err(VariablesParseError::new(
                    item,
                    VariablesParseErrorKind::EmptyKey,
                ));
            }
            if vars.contains_key(key) {
                return Err(VariablesParseError::new(
                    item,
                    VariablesParseErrorKind::DuplicateKey {
                        key: key.to_owned(),
                    },
                ));
            }
            vars.insert(key.to_owned(), value.to_owned());
        }

        Ok(Self { vars })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
