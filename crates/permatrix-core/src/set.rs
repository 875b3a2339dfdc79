//! Deduplicated collections of permission codes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::code::PermissionCode;
use crate::errors::{PermissionError, Result};

/// A set of permission codes.
///
/// Equality ignores order. Iteration is lexicographic; use
/// [`PermissionSet::canonical`] for catalog display order. A set may hold
/// codes the catalog rejects (for example data read back from storage after
/// the catalog evolved); [`validate`](crate::algebra::validate) separates them.
///
/// Serializes as a JSON list of `resource:action` strings. Deserialization
/// only checks syntax and deduplicates; catalog validation happens at the
/// [`wire`](crate::wire) boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet {
    codes: BTreeSet<PermissionCode>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &PermissionCode) -> bool {
        self.codes.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PermissionCode> {
        self.codes.iter()
    }

    /// Codes in catalog order: by resource position, then action position.
    pub fn canonical(&self, catalog: &Catalog) -> Vec<&PermissionCode> {
        let mut codes: Vec<&PermissionCode> = self.codes.iter().collect();
        codes.sort_by(|a, b| catalog.canonical_cmp(a, b));
        codes
    }

    /// Parse a list of raw codes without consulting a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidPermissionCode`] listing every entry
    /// that is not syntactically `resource:action`.
    pub fn parse<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes = BTreeSet::new();
        let mut rejected = Vec::new();
        for entry in raw {
            match PermissionCode::parse(entry.as_ref()) {
                Ok(code) => {
                    codes.insert(code);
                }
                Err(_) => rejected.push(entry.as_ref().trim().to_string()),
            }
        }

        if rejected.is_empty() {
            Ok(Self { codes })
        } else {
            Err(PermissionError::invalid_codes(rejected))
        }
    }

    pub(crate) fn insert(&mut self, code: PermissionCode) -> bool {
        self.codes.insert(code)
    }

    pub(crate) fn remove(&mut self, code: &PermissionCode) -> bool {
        self.codes.remove(code)
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&PermissionCode) -> bool,
    {
        self.codes.retain(keep);
    }
}

impl FromIterator<PermissionCode> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = PermissionCode>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl Extend<PermissionCode> for PermissionSet {
    fn extend<T: IntoIterator<Item = PermissionCode>>(&mut self, iter: T) {
        self.codes.extend(iter);
    }
}

impl IntoIterator for PermissionSet {
    type Item = PermissionCode;
    type IntoIter = std::collections::btree_set::IntoIter<PermissionCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a PermissionCode;
    type IntoIter = std::collections::btree_set::Iter<'a, PermissionCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

impl TryFrom<Vec<String>> for PermissionSet {
    type Error = PermissionError;

    fn try_from(raw: Vec<String>) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        set.codes.into_iter().map(String::from).collect()
    }
}
