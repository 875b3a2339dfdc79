mod common;

use common::*;
use permatrix_core::{Catalog, PermissionError, PermissionSet, algebra};

#[test]
fn test_grant_into_empty_set() {
    let catalog = small_catalog();
    let granted = algebra::grant(&catalog, &PermissionSet::new(), &code("member:read")).unwrap();
    assert_eq!(granted, set(&["member:read"]));
}

#[test]
fn test_grant_disallowed_action_fails_and_leaves_set_unchanged() {
    let catalog = small_catalog();
    let empty = PermissionSet::new();

    let result = algebra::grant(&catalog, &empty, &code("member:delete"));

    assert!(matches!(result, Err(PermissionError::InvalidPermissionCode { .. })));
    assert!(empty.is_empty());
}

#[test]
fn test_grant_on_unavailable_catalog_fails_closed() {
    let catalog = Catalog::unavailable("catalog file missing");
    let result = algebra::grant(&catalog, &PermissionSet::new(), &code("member:read"));
    assert!(matches!(result, Err(PermissionError::CatalogUnavailable(_))));
}

#[test]
fn test_grant_and_revoke_are_idempotent() {
    let catalog = Catalog::builtin();
    for s in valid_sets(&catalog, 20) {
        for c in catalog.all_codes() {
            let once = algebra::grant(&catalog, &s, &c).unwrap();
            assert_eq!(algebra::grant(&catalog, &once, &c).unwrap(), once);

            let once = algebra::revoke(&s, &c);
            assert_eq!(algebra::revoke(&once, &c), once);
        }
    }
}

#[test]
fn test_toggle_twice_is_identity() {
    let catalog = Catalog::builtin();
    for s in valid_sets(&catalog, 20) {
        for c in catalog.all_codes() {
            let twice = algebra::toggle(&catalog, &algebra::toggle(&catalog, &s, &c), &c);
            assert_eq!(twice, s);
        }
    }
}

#[test]
fn test_toggle_of_foreign_code_is_ignored() {
    let catalog = Catalog::builtin();
    let s = set(&["member:read"]);
    for raw in FOREIGN_CODES {
        assert_eq!(algebra::toggle(&catalog, &s, &code(raw)), s);
    }
}

#[test]
fn test_validation_closure() {
    let catalog = Catalog::builtin();
    for _ in 0..50 {
        let s = random_mixed_set(&catalog);
        let validation = algebra::validate(&catalog, &s);

        let expected: Vec<_> = s.iter().filter(|c| !catalog.is_valid(c)).cloned().collect();
        assert_eq!(validation.invalid_codes, expected);
        assert_eq!(validation.valid, expected.is_empty());
    }
}

#[test]
fn test_union_is_commutative_and_associative() {
    let catalog = Catalog::builtin();
    for _ in 0..30 {
        let a = random_valid_set(&catalog);
        let b = random_valid_set(&catalog);
        let c = random_valid_set(&catalog);

        assert_eq!(algebra::union(&a, &b), algebra::union(&b, &a));
        assert_eq!(
            algebra::union(&algebra::union(&a, &b), &c),
            algebra::union(&a, &algebra::union(&b, &c))
        );
    }
}

#[test]
fn test_retain_valid_partitions_the_set() {
    let catalog = Catalog::builtin();
    for _ in 0..30 {
        let s = random_mixed_set(&catalog);
        let (kept, dropped) = algebra::retain_valid(&catalog, &s);

        assert!(algebra::validate(&catalog, &kept).valid);
        assert_eq!(kept.len() + dropped.len(), s.len());
        assert_eq!(dropped, algebra::validate(&catalog, &s).invalid_codes);
    }
}

#[test]
fn test_row_operations() {
    let catalog = small_catalog();
    let full = algebra::grant_resource(&catalog, &PermissionSet::new(), "member");
    assert_eq!(full, set(&["member:read", "member:update"]));

    let with_account = algebra::grant(&catalog, &full, &code("account:read")).unwrap();
    assert_eq!(algebra::revoke_resource(&with_account, "member"), set(&["account:read"]));
    assert_eq!(
        algebra::grant_resource(&catalog, &with_account, "ghost"),
        with_account
    );
}
