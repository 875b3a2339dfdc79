#![allow(dead_code)]

use fake::{Fake, Faker};
use permatrix_core::{Catalog, PermissionCode, PermissionSet};

pub use permatrix::testing::*;

/// Codes that parse but that no catalog in these tests allows.
pub const FOREIGN_CODES: &[&str] = &["ghost:read", "member:approve", "audit_log:export"];

pub fn code(raw: &str) -> PermissionCode {
    PermissionCode::parse(raw).unwrap()
}

/// A random subset of the catalog's codes.
pub fn random_valid_set(catalog: &Catalog) -> PermissionSet {
    catalog
        .all_codes()
        .into_iter()
        .filter(|_| Faker.fake::<bool>())
        .collect()
}

/// A random valid subset plus a random subset of [`FOREIGN_CODES`].
pub fn random_mixed_set(catalog: &Catalog) -> PermissionSet {
    let mut set = random_valid_set(catalog);
    set.extend(
        FOREIGN_CODES
            .iter()
            .filter(|_| Faker.fake::<bool>())
            .map(|raw| code(raw)),
    );
    set
}

/// Some fixed edge cases followed by `n` random valid sets.
pub fn valid_sets(catalog: &Catalog, n: usize) -> Vec<PermissionSet> {
    let mut sets = vec![
        PermissionSet::new(),
        PermissionSet::from_iter(catalog.all_codes()),
    ];
    sets.extend((0..n).map(|_| random_valid_set(catalog)));
    sets
}
