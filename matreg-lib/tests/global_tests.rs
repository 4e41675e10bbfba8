//! Registries on the process-wide namespace. Kept in its own test binary
//! so no other test touches the global instance first.

use matreg::{MaterialRegistry, SharedNamespace};

#[test]
fn test_builtins_registered_once_per_process() {
    let first = MaterialRegistry::with_defaults();
    assert_eq!(first.material_count(), 4);
    assert_eq!(first.material_index("Air"), Some(1));

    let second = MaterialRegistry::with_defaults();
    assert_eq!(second.material_count(), 0);
    assert_eq!(second.element_count(), 0);
    assert!(second.namespace().ptr_eq(&SharedNamespace::global()));

    let air = second.material_by_name("Air").unwrap();
    assert!(std::sync::Arc::ptr_eq(&air, &first.materials()[1]));
}
