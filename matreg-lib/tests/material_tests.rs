use std::sync::Arc;

use approx::assert_relative_eq;
use matreg::{
    AddMaterialRequest, MaterialRegistry, MaterialState, NistCatalog, Proportion, RegistryError,
    SharedNamespace,
};

fn registry() -> MaterialRegistry {
    MaterialRegistry::new(SharedNamespace::new(), NistCatalog)
}

fn add(registry: &mut MaterialRegistry, name: &str, formula: &str) -> Result<(), RegistryError> {
    registry
        .add_material(&AddMaterialRequest::new(name, formula, 1.0))
        .map(|_| ())
}

#[test]
fn test_builtin_materials() {
    let registry = registry();
    let names: Vec<_> = registry
        .materials()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, ["Vacuum", "Air", "Aluminium", "Silicon"]);

    let air = registry.material(1).unwrap();
    assert_relative_eq!(air.density, 1.290e-3);
    assert_eq!(air.components[0].proportion, Proportion::MassFraction(0.78));
    assert_eq!(air.components[1].proportion, Proportion::MassFraction(0.22));

    let vacuum = registry.material(0).unwrap();
    assert_eq!(vacuum.state, MaterialState::Gas);
    assert_eq!(vacuum.temperature, Some(2.73));
    assert_eq!(vacuum.pressure, Some(3.0e-18));
}

#[test]
fn test_add_water_appends() {
    let mut registry = registry();
    let water = registry
        .add_material(&AddMaterialRequest::new("X", "H2-O", 1.0))
        .unwrap();

    assert_eq!(registry.material_index("X"), Some(registry.material_count() - 1));
    assert_eq!(water.components.len(), 2);
    assert_eq!(water.components[0].element.symbol, "H");
    assert_eq!(water.components[0].proportion, Proportion::Atoms(2));
    assert_eq!(water.components[1].element.symbol, "O");
    assert_eq!(water.components[1].proportion, Proportion::Atoms(1));
    assert_eq!(water.state, MaterialState::Undefined);
}

#[test]
fn test_builtin_elements_are_reused() {
    let mut registry = registry();
    let air = registry.material(1).unwrap().clone();
    let water = registry
        .add_material(&AddMaterialRequest::new("Water", "H2-O", 1.0))
        .unwrap();

    // O and H were pre-created, so nothing new is recorded
    assert_eq!(registry.element_count(), 4);
    assert!(Arc::ptr_eq(
        &water.components[1].element,
        &air.components[1].element
    ));
    assert_relative_eq!(water.components[1].element.molar_mass, 16.00);
}

#[test]
fn test_new_element_uses_table_mass() {
    let mut registry = registry();
    let salt = registry
        .add_material(&AddMaterialRequest::new("Salt", "Na-Cl", 2.165))
        .unwrap();
    assert_eq!(registry.element_count(), 6);
    assert_relative_eq!(salt.components[0].element.molar_mass, 22.98977);
    assert_eq!(salt.components[1].element.atomic_number, 17);
}

#[test]
fn test_mass_fraction_formula() {
    let mut registry = registry();
    let co = registry
        .add_material(&AddMaterialRequest::new("CO", "C.5-O.5", 1.0))
        .unwrap();
    assert_eq!(co.components[0].proportion, Proportion::MassFraction(0.5));
    assert_eq!(co.components[1].proportion, Proportion::MassFraction(0.5));
}

#[test]
fn test_isotope_formula_and_reuse() {
    let mut registry = registry();
    let first = registry
        .add_material(&AddMaterialRequest::new("Hematite56", "Fe(56)2-O3", 5.26))
        .unwrap();
    assert_eq!(registry.isotope_count(), 1);

    let iron = &first.components[0];
    assert_eq!(iron.element.name, "Fe56");
    assert_eq!(iron.proportion, Proportion::Atoms(2));
    let isotope = iron.element.isotope.as_ref().unwrap();
    assert_eq!(isotope.atomic_number, 26);
    assert_eq!(isotope.mass_number, 56);
    assert_relative_eq!(isotope.molar_mass, 56.0);
    assert_eq!(first.components[1].proportion, Proportion::Atoms(3));

    let second = registry
        .add_material(&AddMaterialRequest::new("Iron56", "fe(56)", 7.87))
        .unwrap();
    assert_eq!(registry.isotope_count(), 1);
    assert!(Arc::ptr_eq(
        &first.components[0].element,
        &second.components[0].element
    ));
    assert!(Arc::ptr_eq(
        registry.isotopes().first().unwrap(),
        second.components[0].element.isotope.as_ref().unwrap()
    ));
}

#[test]
fn test_duplicate_name_rejected() {
    let mut registry = registry();
    add(&mut registry, "Water", "H2-O").unwrap();
    let count = registry.material_count();

    assert_eq!(
        add(&mut registry, "Water", "D2-O"),
        Err(RegistryError::DuplicateName("Water".to_string()))
    );
    assert_eq!(
        add(&mut registry, "Air", "N-O"),
        Err(RegistryError::DuplicateName("Air".to_string()))
    );
    assert_eq!(registry.material_count(), count);
}

#[test]
fn test_unknown_element_leaves_registry_unchanged() {
    let mut registry = registry();
    let before = registry.snapshot();

    let err = add(&mut registry, "Bad", "Xx2-O").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownElement { ref symbol, .. } if symbol == "Xx"));

    // a valid first component must not leak a new element
    let err = add(&mut registry, "Bad", "Na-Qq").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownElement { .. }));

    assert_eq!(registry.snapshot(), before);
    assert!(registry.material_by_name("Bad").is_none());
    assert!(registry.namespace().lock().element("Na").is_none());
}

#[test]
fn test_empty_formula() {
    let mut registry = registry();
    assert_eq!(
        add(&mut registry, "Nothing", ""),
        Err(RegistryError::EmptyFormula(String::new()))
    );
    assert_eq!(registry.material_count(), 4);
}

#[test]
fn test_state_checks_precede_formula() {
    let mut registry = registry();
    let request = AddMaterialRequest::new("Cold", "Xx", 1.0).solid(-5.0);
    assert!(matches!(
        registry.add_material(&request),
        Err(RegistryError::InvalidState { .. })
    ));
}

#[test]
fn test_solid_and_gas_states() {
    let mut registry = registry();
    let ice = registry
        .add_material(&AddMaterialRequest::new("Ice", "H2-O", 0.92).solid(250.0))
        .unwrap();
    assert_eq!(ice.state, MaterialState::Solid);
    assert_eq!(ice.temperature, Some(250.0));
    assert_eq!(ice.pressure, None);

    let xenon = registry
        .add_material(&AddMaterialRequest::new("Xenon", "Xe", 0.0059).gas(Some(300.0), 1.0e5))
        .unwrap();
    assert_eq!(xenon.state, MaterialState::Gas);
    assert_eq!(xenon.temperature, Some(300.0));
    assert_eq!(xenon.pressure, Some(1.0e5));

    let no_pressure = AddMaterialRequest {
        pressure: None,
        ..AddMaterialRequest::new("Argon", "Ar", 0.0017).gas(Some(300.0), 1.0)
    };
    assert!(matches!(
        registry.add_material(&no_pressure),
        Err(RegistryError::InvalidState { .. })
    ));
    assert!(registry.material_index("Argon").is_none());
}

#[test]
fn test_mixed_proportions_rejected() {
    let mut registry = registry();
    assert_eq!(
        add(&mut registry, "Mixed", "H2-O.5"),
        Err(RegistryError::MixedProportions("H2-O.5".to_string()))
    );
}

#[test]
fn test_material_index_not_found() {
    let registry = registry();
    assert_eq!(registry.material_index("Silicon"), Some(3));
    assert_eq!(registry.material_index("silicon"), None);
    assert!(registry.material(4).is_none());
}

#[test]
fn test_material_count_tracks_adds() {
    let mut registry = registry();
    for (i, formula) in ["H2-O", "Si-O2", "Ca-F2"].iter().enumerate() {
        add(&mut registry, &format!("M{i}"), formula).unwrap();
    }
    assert_eq!(registry.material_count(), 7);
    assert_eq!(registry.material_index("M2"), Some(6));
}
