use std::fmt::Write;
use std::sync::Arc;

use log::{debug, info, warn};
use matreg_data::{MaterialState, Proportion, RegistrySnapshot};

use crate::catalog::{CatalogFilter, MaterialCatalog, NistCatalog};
use crate::error::{RegistryError, Result};
use crate::formula::{FormulaComponent, parse_formula, split_components};
use crate::material::{Element, Isotope, Material};
use crate::namespace::{Namespace, SharedNamespace};
use crate::periodic_table;
use crate::units::{Density, NTP_TEMPERATURE, UNIVERSE_MEAN_DENSITY};

/// Everything needed to define a material from a formula.
#[derive(Debug, Clone, PartialEq)]
pub struct AddMaterialRequest {
    pub name: String,
    pub formula: String,
    /// g/cm³
    pub density: f64,
    pub state: Option<MaterialState>,
    /// Kelvin
    pub temperature: Option<f64>,
    /// Pascal
    pub pressure: Option<f64>,
}

impl AddMaterialRequest {
    pub fn new(name: impl Into<String>, formula: impl Into<String>, density: f64) -> Self {
        AddMaterialRequest {
            name: name.into(),
            formula: formula.into(),
            density,
            state: None,
            temperature: None,
            pressure: None,
        }
    }

    pub fn solid(mut self, temperature: f64) -> Self {
        self.state = Some(MaterialState::Solid);
        self.temperature = Some(temperature);
        self
    }

    pub fn gas(mut self, temperature: Option<f64>, pressure: f64) -> Self {
        self.state = Some(MaterialState::Gas);
        self.temperature = temperature;
        self.pressure = Some(pressure);
        self
    }

    /// State, temperature and pressure the material is built with.
    ///
    /// Solids need a positive temperature and gases a positive pressure;
    /// a gas without a positive temperature is taken at normal temperature.
    fn resolve_state(&self) -> Result<(MaterialState, Option<f64>, Option<f64>)> {
        let positive = |v: Option<f64>| v.filter(|&x| x > 0.0);
        match self.state.unwrap_or_default() {
            MaterialState::Undefined => Ok((MaterialState::Undefined, None, None)),
            MaterialState::Solid => match positive(self.temperature) {
                Some(t) => Ok((MaterialState::Solid, Some(t), None)),
                None => Err(self.invalid_state()),
            },
            MaterialState::Gas => match positive(self.pressure) {
                Some(p) => {
                    let t = positive(self.temperature).unwrap_or(NTP_TEMPERATURE);
                    Ok((MaterialState::Gas, Some(t), Some(p)))
                }
                None => Err(self.invalid_state()),
            },
        }
    }

    fn invalid_state(&self) -> RegistryError {
        RegistryError::InvalidState {
            name: self.name.clone(),
            state: self.state.unwrap_or_default().to_string(),
            temperature: self.temperature,
            pressure: self.pressure,
        }
    }
}

/// Registry of the materials, elements and isotopes defined through it.
///
/// The three lists are append-only, so an index obtained once stays valid.
/// Elements and isotopes are shared through the [`Namespace`]: a symbol or
/// isotope already known there is reused rather than rebuilt.
///
/// # Examples
/// ```
/// use matreg::{AddMaterialRequest, MaterialRegistry, NistCatalog, SharedNamespace};
///
/// let mut registry = MaterialRegistry::new(SharedNamespace::new(), NistCatalog);
/// assert_eq!(registry.material_count(), 4);
///
/// registry.add_material(&AddMaterialRequest::new("Water", "H2-O", 1.0)).unwrap();
/// assert_eq!(registry.material_index("Water"), Some(4));
/// ```
#[derive(Debug)]
pub struct MaterialRegistry<C = NistCatalog> {
    namespace: SharedNamespace,
    catalog: C,
    materials: Vec<Arc<Material>>,
    elements: Vec<Arc<Element>>,
    isotopes: Vec<Arc<Isotope>>,
}

impl MaterialRegistry<NistCatalog> {
    /// Registry on the process-wide namespace with the NIST catalog.
    ///
    /// Only the first registry created this way holds the built-in
    /// materials; later ones start empty.
    pub fn with_defaults() -> Self {
        Self::new(SharedNamespace::global(), NistCatalog)
    }
}

impl<C: MaterialCatalog> MaterialRegistry<C> {
    /// Creates a registry, defining the built-in materials if `namespace`
    /// has not seen them yet.
    pub fn new(namespace: SharedNamespace, catalog: C) -> Self {
        let (materials, elements) = {
            let mut ns = namespace.lock();
            if ns.mark_builtins_registered() {
                (Vec::new(), Vec::new())
            } else {
                register_builtins(&mut ns)
            }
        };

        MaterialRegistry {
            namespace,
            catalog,
            materials,
            elements,
            isotopes: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &SharedNamespace {
        &self.namespace
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Defines a material from a formula such as `H2-O` or `Fe(56)2-O3`.
    ///
    /// Checks run in order: unique name, non-empty formula, a valid
    /// state/temperature/pressure combination, then every formula component.
    /// On error nothing is added.
    pub fn add_material(&mut self, request: &AddMaterialRequest) -> Result<Arc<Material>> {
        let result = self.try_add_material(request);
        match &result {
            Ok(_) => info!("{}", self.added_message(&request.name, &request.formula)),
            Err(e) => warn!("add_material {}: {e}; command rejected", request.name),
        }
        result
    }

    fn try_add_material(&mut self, request: &AddMaterialRequest) -> Result<Arc<Material>> {
        if self.is_defined(&request.name) {
            return Err(RegistryError::DuplicateName(request.name.clone()));
        }
        if split_components(&request.formula).next().is_none() {
            return Err(RegistryError::EmptyFormula(request.formula.clone()));
        }
        let (state, temperature, pressure) = request.resolve_state()?;
        let components = parse_formula(&request.formula)?;

        let namespace = self.namespace.clone();
        let mut ns = namespace.lock();
        // another registry on this namespace may have taken the name meanwhile
        if ns.contains_material(&request.name) {
            return Err(RegistryError::DuplicateName(request.name.clone()));
        }
        let material = components.iter().fold(
            Material::new(&request.name, request.density).with_state(state, temperature, pressure),
            |material, component| {
                let element = self.resolve_element(&mut ns, component);
                material.with_component(element, component.proportion)
            },
        );

        let material = ns.register_material(material);
        self.materials.push(material.clone());
        Ok(material)
    }

    fn is_defined(&self, name: &str) -> bool {
        self.material_index(name).is_some() || self.namespace.lock().contains_material(name)
    }

    /// Element for one formula component, built and recorded on first use.
    fn resolve_element(&mut self, ns: &mut Namespace, component: &FormulaComponent) -> Arc<Element> {
        let index = component.element;
        let symbol = component.symbol();
        let z = periodic_table::atomic_number(index);

        let Some((name, mass_number)) = component.isotope_name().zip(component.mass_number) else {
            let (element, created) = ns.element_or_insert_with(symbol, || {
                Element::natural(symbol, symbol, z, periodic_table::atomic_mass(index))
            });
            if created {
                self.elements.push(element.clone());
            } else {
                debug!("reusing element {symbol}");
            }
            return element;
        };

        let (isotope, created) = ns
            .isotope_or_insert_with(&name, || Isotope::from_mass_number(&name, z, mass_number));
        if created {
            self.isotopes.push(isotope.clone());
        } else {
            debug!("reusing isotope {name}");
        }

        let (element, created) =
            ns.element_or_insert_with(&name, || Element::from_isotope(symbol, isotope));
        if created {
            self.elements.push(element.clone());
        }
        element
    }

    /// Adds a material from the standard-reference catalog by name.
    pub fn add_nist_material(&mut self, name: &str) -> Result<Arc<Material>> {
        if self.material_index(name).is_some() {
            let e = RegistryError::DuplicateName(name.to_string());
            warn!("add_nist_material: {e}; command rejected");
            return Err(e);
        }

        let (found, taken) = {
            let mut ns = self.namespace.lock();
            let found = self.catalog.find_or_build(name, &mut ns);
            let taken = found.is_none() && ns.contains_material(name);
            (found, taken)
        };
        let Some(material) = found else {
            let e = if taken {
                RegistryError::DuplicateName(name.to_string())
            } else {
                RegistryError::UnknownCatalogMaterial(name.to_string())
            };
            warn!("add_nist_material: {e}");
            return Err(e);
        };

        self.materials.push(material.clone());
        info!(" Material:{name} added from the NIST tables.");
        Ok(material)
    }

    pub fn list_nist(&self, filter: CatalogFilter) -> String {
        self.catalog.list(filter)
    }

    /// Zero-based position of the named material in this registry.
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    pub fn material(&self, index: usize) -> Option<&Arc<Material>> {
        self.materials.get(index)
    }

    /// Looks the name up in the namespace, which also knows materials
    /// defined through other registries or the catalog.
    pub fn material_by_name(&self, name: &str) -> Option<Arc<Material>> {
        self.namespace.lock().material(name)
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn elements(&self) -> &[Arc<Element>] {
        &self.elements
    }

    pub fn isotopes(&self) -> &[Arc<Isotope>] {
        &self.isotopes
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    /// Materials cannot be removed once defined, so this always fails:
    /// with `InvalidIndex` when the 1-based `index` is out of range,
    /// otherwise with `UnsupportedOperation`.
    pub fn delete_material(&mut self, index: i64) -> Result<()> {
        let target = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.materials.get(i));

        let e = match target {
            Some(material) => RegistryError::UnsupportedOperation(material.name.clone()),
            None => RegistryError::InvalidIndex {
                index,
                count: self.materials.len(),
            },
        };
        warn!("delete_material: {e}; command rejected");
        Err(e)
    }

    /// Always fails with `UnsupportedOperation`.
    pub fn delete_material_by_name(&mut self, name: &str) -> Result<()> {
        let e = RegistryError::UnsupportedOperation(name.to_string());
        warn!("delete_material: {e}; command rejected");
        Err(e)
    }

    /// Registered materials in registration order with 1-based indices.
    pub fn list_materials(&self) -> String {
        let mut out = format!(
            " There are{:>3} materials defined.\n",
            self.materials.len()
        );
        for (i, material) in self.materials.iter().enumerate() {
            let _ = writeln!(
                out,
                "     Material Index {:>3} {:>14}  density: {:>6}",
                i + 1,
                material.name,
                Density(material.density).to_string()
            );
        }
        out
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            materials: self.materials.iter().map(|m| m.to_record()).collect(),
            elements: self.elements.iter().map(|e| e.to_record()).collect(),
            isotopes: self.isotopes.iter().map(|i| i.to_record()).collect(),
        }
    }

    pub(crate) fn added_message(&self, name: &str, formula: &str) -> String {
        format!(
            " Material:{name} with formula: {formula} added!\n     Nb of Material = {}\n     Nb of Isotope =  {}\n     Nb of Element =  {}",
            self.materials.len(),
            self.isotopes.len(),
            self.elements.len()
        )
    }
}

/// Defines Vacuum, Air, Aluminium and Silicon plus the C and H elements.
///
/// Returns the registry-owned materials and elements. Aluminium and silicon
/// elements live only in the namespace.
fn register_builtins(ns: &mut Namespace) -> (Vec<Arc<Material>>, Vec<Arc<Element>>) {
    let mut element = |name: &str, z: u32, molar_mass: f64| {
        ns.element_or_insert_with(name, || Element::natural(name, name, z, molar_mass))
            .0
    };

    let vacuum_element = element("Vacuum", 1, 1.01);
    let n = element("N", 7, 14.01);
    let o = element("O", 8, 16.00);
    let al = element("Al", 13, 26.98);
    let si = element("Si", 14, 28.0855);
    let c = element("C", 6, 12.0107);
    let h = element("H", 1, 1.00794);

    let builtins = [
        Material::new("Vacuum", UNIVERSE_MEAN_DENSITY)
            .with_state(MaterialState::Gas, Some(2.73), Some(3.0e-18))
            .with_component(vacuum_element, Proportion::Atoms(1)),
        Material::new("Air", 1.290e-3)
            .with_component(n.clone(), Proportion::MassFraction(0.78))
            .with_component(o.clone(), Proportion::MassFraction(0.22)),
        Material::new("Aluminium", 2.700).with_component(al, Proportion::Atoms(1)),
        Material::new("Silicon", 2.3290).with_component(si, Proportion::Atoms(1)),
    ];

    let materials = builtins
        .into_iter()
        .map(|m| ns.register_material(m))
        .collect();
    (materials, vec![n, o, c, h])
}
