mod common;

use common::*;
use permatrix_core::{Catalog, PermissionSet, algebra, codec};

#[test]
fn test_member_read_round_trip() {
    let catalog = small_catalog();
    let granted = algebra::grant(&catalog, &PermissionSet::new(), &code("member:read")).unwrap();

    let grouped = codec::to_grouped(&catalog, &granted);
    assert_eq!(grouped.view.len(), 1);
    assert_eq!(
        grouped.view.actions("member").map(|a| a.iter().cloned().collect::<Vec<_>>()),
        Some(vec!["read".to_string()])
    );

    assert_eq!(codec::to_flat(&grouped.view), set(&["member:read"]));
}

#[test]
fn test_round_trip_over_random_sets() {
    for catalog in [Catalog::builtin(), small_catalog()] {
        for s in valid_sets(&catalog, 50) {
            let grouped = codec::to_grouped(&catalog, &s);
            assert!(grouped.dropped.is_empty());
            assert_eq!(codec::to_flat(&grouped.view), s);
        }
    }
}

#[test]
fn test_grouped_view_omits_empty_resources() {
    let catalog = Catalog::builtin();
    for s in valid_sets(&catalog, 20) {
        let grouped = codec::to_grouped(&catalog, &s);
        assert!(grouped.view.iter().all(|(_, actions)| !actions.is_empty()));
    }
}

#[test]
fn test_foreign_codes_are_dropped_from_view() {
    let catalog = small_catalog();
    let mut s = set(&["member:read"]);
    s.extend(FOREIGN_CODES.iter().map(|raw| code(raw)));

    let grouped = codec::to_grouped(&catalog, &s);
    assert_eq!(codec::to_flat(&grouped.view), set(&["member:read"]));
    assert_eq!(grouped.dropped.len(), FOREIGN_CODES.len());
}
