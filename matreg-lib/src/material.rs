use std::sync::Arc;

use matreg_data::{
    ComponentRecord, ElementRecord, IsotopeRecord, MaterialRecord, MaterialState, Proportion,
};

/// A single nuclide, named `<Symbol><A>` (e.g. `Fe56`).
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    pub name: String,
    pub atomic_number: u32,
    pub mass_number: u32,
    /// g/mol
    pub molar_mass: f64,
}

impl Isotope {
    /// Isotope whose molar mass is taken as its mass number in g/mol.
    pub fn from_mass_number(name: impl Into<String>, atomic_number: u32, mass_number: u32) -> Self {
        Isotope {
            name: name.into(),
            atomic_number,
            mass_number,
            molar_mass: f64::from(mass_number),
        }
    }

    pub fn to_record(&self) -> IsotopeRecord {
        IsotopeRecord {
            name: self.name.clone(),
            atomic_number: self.atomic_number,
            mass_number: self.mass_number,
            molar_mass: self.molar_mass,
        }
    }
}

/// A chemical element, either with natural isotopic abundance or made of
/// one isotope at 100%.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    pub atomic_number: u32,
    /// g/mol
    pub molar_mass: f64,
    pub isotope: Option<Arc<Isotope>>,
}

impl Element {
    pub fn natural(
        name: impl Into<String>,
        symbol: impl Into<String>,
        atomic_number: u32,
        molar_mass: f64,
    ) -> Self {
        Element {
            name: name.into(),
            symbol: symbol.into(),
            atomic_number,
            molar_mass,
            isotope: None,
        }
    }

    /// Element sharing the isotope's name and holding it at 100% abundance.
    pub fn from_isotope(symbol: impl Into<String>, isotope: Arc<Isotope>) -> Self {
        Element {
            name: isotope.name.clone(),
            symbol: symbol.into(),
            atomic_number: isotope.atomic_number,
            molar_mass: isotope.molar_mass,
            isotope: Some(isotope),
        }
    }

    pub fn to_record(&self) -> ElementRecord {
        ElementRecord {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            atomic_number: self.atomic_number,
            molar_mass: self.molar_mass,
            isotope: self.isotope.as_ref().map(|i| i.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub element: Arc<Element>,
    pub proportion: Proportion,
}

/// A named, fixed composition. Never mutated once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// g/cm³
    pub density: f64,
    pub state: MaterialState,
    /// Kelvin
    pub temperature: Option<f64>,
    /// Pascal
    pub pressure: Option<f64>,
    pub components: Vec<Component>,
}

impl Material {
    pub fn new(name: impl Into<String>, density: f64) -> Self {
        Material {
            name: name.into(),
            density,
            state: MaterialState::Undefined,
            temperature: None,
            pressure: None,
            components: Vec::new(),
        }
    }

    pub fn with_state(
        mut self,
        state: MaterialState,
        temperature: Option<f64>,
        pressure: Option<f64>,
    ) -> Self {
        self.state = state;
        self.temperature = temperature;
        self.pressure = pressure;
        self
    }

    pub fn with_component(mut self, element: Arc<Element>, proportion: Proportion) -> Self {
        self.components.push(Component {
            element,
            proportion,
        });
        self
    }

    /// Mass fraction of each component, in composition order.
    ///
    /// Atom counts are weighted by the element molar mass; mass fractions
    /// are normalized to sum to one.
    pub fn mass_fractions(&self) -> Vec<f64> {
        let weights: Vec<f64> = self
            .components
            .iter()
            .map(|c| match c.proportion {
                Proportion::Atoms(n) => f64::from(n) * c.element.molar_mass,
                Proportion::MassFraction(w) => w,
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return vec![0.0; weights.len()];
        }
        weights.into_iter().map(|w| w / total).collect()
    }

    pub fn to_record(&self) -> MaterialRecord {
        MaterialRecord {
            name: self.name.clone(),
            density: self.density,
            state: self.state,
            temperature: self.temperature,
            pressure: self.pressure,
            components: self
                .components
                .iter()
                .map(|c| ComponentRecord {
                    element: c.element.name.clone(),
                    proportion: c.proportion,
                })
                .collect(),
        }
    }
}
