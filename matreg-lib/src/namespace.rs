use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::material::{Element, Isotope, Material};

/// Name-indexed table of every isotope, element and material defined so
/// far, shared by all registries and catalogs that build into it.
///
/// Names are unique per kind. Entries are never removed.
#[derive(Debug, Default)]
pub struct Namespace {
    isotopes: HashMap<String, Arc<Isotope>>,
    elements: HashMap<String, Arc<Element>>,
    materials: HashMap<String, Arc<Material>>,
    catalog_materials: HashSet<String>,
    builtins_registered: bool,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn isotope(&self, name: &str) -> Option<Arc<Isotope>> {
        self.isotopes.get(name).cloned()
    }

    pub fn element(&self, name: &str) -> Option<Arc<Element>> {
        self.elements.get(name).cloned()
    }

    pub fn material(&self, name: &str) -> Option<Arc<Material>> {
        self.materials.get(name).cloned()
    }

    pub fn contains_material(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Returns the isotope called `name`, building it with `make` if absent.
    /// The flag is true when a new isotope was inserted.
    pub fn isotope_or_insert_with(
        &mut self,
        name: &str,
        make: impl FnOnce() -> Isotope,
    ) -> (Arc<Isotope>, bool) {
        if let Some(existing) = self.isotopes.get(name) {
            return (existing.clone(), false);
        }
        let isotope = Arc::new(make());
        self.isotopes.insert(name.to_string(), isotope.clone());
        (isotope, true)
    }

    /// Returns the element called `name`, building it with `make` if absent.
    /// The flag is true when a new element was inserted.
    pub fn element_or_insert_with(
        &mut self,
        name: &str,
        make: impl FnOnce() -> Element,
    ) -> (Arc<Element>, bool) {
        if let Some(existing) = self.elements.get(name) {
            return (existing.clone(), false);
        }
        let element = Arc::new(make());
        self.elements.insert(name.to_string(), element.clone());
        (element, true)
    }

    /// Registers a material under its name. An existing material of the
    /// same name wins and is returned instead.
    pub fn register_material(&mut self, material: Material) -> Arc<Material> {
        self.materials
            .entry(material.name.clone())
            .or_insert_with(|| Arc::new(material))
            .clone()
    }

    /// The named material, only if a catalog built it.
    pub fn catalog_material(&self, name: &str) -> Option<Arc<Material>> {
        if self.catalog_materials.contains(name) {
            self.material(name)
        } else {
            None
        }
    }

    /// Registers a material built by a catalog. Returns `None` when the
    /// name is already held by a material the catalog did not build.
    pub fn register_catalog_material(&mut self, material: Material) -> Option<Arc<Material>> {
        if let Some(existing) = self.catalog_material(&material.name) {
            return Some(existing);
        }
        if self.contains_material(&material.name) {
            return None;
        }
        self.catalog_materials.insert(material.name.clone());
        Some(self.register_material(material))
    }

    pub fn builtins_registered(&self) -> bool {
        self.builtins_registered
    }

    /// Marks the built-in materials as registered, returning the previous
    /// value of the flag.
    pub fn mark_builtins_registered(&mut self) -> bool {
        std::mem::replace(&mut self.builtins_registered, true)
    }

    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

static GLOBAL: OnceLock<SharedNamespace> = OnceLock::new();

/// Cloneable handle to a [`Namespace`].
///
/// Mutations through one handle are visible through every clone, and each
/// lookup-then-insert sequence runs under a single lock.
#[derive(Debug, Clone, Default)]
pub struct SharedNamespace(Arc<Mutex<Namespace>>);

impl SharedNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide namespace.
    pub fn global() -> Self {
        GLOBAL.get_or_init(SharedNamespace::new).clone()
    }

    pub fn lock(&self) -> MutexGuard<'_, Namespace> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &SharedNamespace) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_lookup_or_create_element() {
        let mut ns = Namespace::new();
        let (first, created) =
            ns.element_or_insert_with("H", || Element::natural("H", "H", 1, 1.00794));
        assert!(created);
        let (second, created) = ns.element_or_insert_with("H", || unreachable!());
        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ns.element_count(), 1);
    }

    #[test]
    fn test_lookup_or_create_isotope() {
        let mut ns = Namespace::new();
        let (a, created) =
            ns.isotope_or_insert_with("U235", || Isotope::from_mass_number("U235", 92, 235));
        assert!(created);
        let (b, created) = ns.isotope_or_insert_with("U235", || unreachable!());
        assert!(!created);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(ns.isotope("U238").is_none());
    }

    #[test]
    fn test_register_material_keeps_first() {
        let mut ns = Namespace::new();
        let first = ns.register_material(Material::new("Water", 1.0));
        let second = ns.register_material(Material::new("Water", 2.0));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ns.material("Water").unwrap().density, 1.0);
        assert!(ns.contains_material("Water"));
        assert_eq!(ns.material_count(), 1);
    }

    #[test]
    fn test_catalog_materials_tracked_separately() {
        let mut ns = Namespace::new();
        ns.register_material(Material::new("G4_WATER", 2.0));
        assert!(ns.catalog_material("G4_WATER").is_none());
        assert!(ns.register_catalog_material(Material::new("G4_WATER", 1.0)).is_none());

        let air = ns.register_catalog_material(Material::new("G4_AIR", 0.0012)).unwrap();
        let again = ns.catalog_material("G4_AIR").unwrap();
        assert!(Arc::ptr_eq(&air, &again));
    }

    #[test]
    fn test_builtins_flag() {
        let mut ns = Namespace::new();
        assert!(!ns.builtins_registered());
        assert!(!ns.mark_builtins_registered());
        assert!(ns.mark_builtins_registered());
        assert!(ns.builtins_registered());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(SharedNamespace::global().ptr_eq(&SharedNamespace::global()));
        assert!(!SharedNamespace::new().ptr_eq(&SharedNamespace::new()));
    }

    #[test]
    fn test_concurrent_lookup_or_create() {
        let shared = SharedNamespace::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .lock()
                        .element_or_insert_with("Fe", || Element::natural("Fe", "Fe", 26, 55.845))
                        .0
                })
            })
            .collect();

        let elements: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(elements.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(shared.lock().element_count(), 1);
    }
}
