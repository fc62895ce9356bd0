//! Query filter specifications.
//!
//! Each resource accepts a fixed set of logical filter names. Some of them are
//! sent under a different name on the wire.

use std::collections::BTreeMap;

use crate::error::{OtcError, Result};

/// One recognized filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParam {
    /// Name callers use.
    pub name: &'static str,
    /// Name sent in the query string.
    pub wire: &'static str,
}

impl FilterParam {
    /// A filter sent under its own name.
    pub const fn same(name: &'static str) -> Self {
        Self { name, wire: name }
    }

    /// A filter renamed on the wire.
    pub const fn renamed(name: &'static str, wire: &'static str) -> Self {
        Self { name, wire }
    }
}

/// The filters a resource accepts.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    pub params: &'static [FilterParam],
}

impl FilterSpec {
    /// A resource that accepts no filters.
    pub const NONE: FilterSpec = FilterSpec { params: &[] };

    /// Look up a logical filter name.
    pub fn find(&self, name: &str) -> Option<&FilterParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Translate logical filters into wire query pairs.
    ///
    /// With `allow_unknown` set, names outside the table are forwarded as-is;
    /// otherwise the first one fails the whole call.
    ///
    /// # Errors
    ///
    /// Returns [`OtcError::UnknownFilter`] for an unrecognized name.
    pub fn transpose(
        &self,
        resource: &'static str,
        filters: &BTreeMap<String, String>,
        allow_unknown: bool,
    ) -> Result<Vec<(String, String)>> {
        filters
            .iter()
            .map(|(name, value)| match self.find(name) {
                Some(param) => Ok((param.wire.to_string(), value.clone())),
                None if allow_unknown => Ok((name.clone(), value.clone())),
                None => Err(OtcError::UnknownFilter {
                    resource,
                    name: name.clone(),
                }),
            })
            .collect()
    }

    /// Check for duplicate logical or wire names.
    pub fn validate(&self, resource: &'static str) -> Result<()> {
        for (i, param) in self.params.iter().enumerate() {
            let rest = &self.params[i + 1..];
            if rest.iter().any(|p| p.name == param.name) {
                return Err(OtcError::InvalidSchema {
                    schema: resource,
                    reason: format!("duplicate filter name '{}'", param.name),
                });
            }
            if rest.iter().any(|p| p.wire == param.wire) {
                return Err(OtcError::InvalidSchema {
                    schema: resource,
                    reason: format!("duplicate filter wire name '{}'", param.wire),
                });
            }
        }
        Ok(())
    }
}
