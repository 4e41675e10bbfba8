#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Physical state attached to a material at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaterialState {
    #[default]
    Undefined,
    Solid,
    Gas,
}

impl fmt::Display for MaterialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Solid => f.write_str("solid"),
            Self::Gas => f.write_str("gas"),
        }
    }
}

/// How much of one element a material contains.
///
/// A composition is expressed either entirely in atom counts per formula
/// unit or entirely in mass fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Proportion {
    Atoms(u32),
    MassFraction(f64),
}

impl Proportion {
    pub fn is_atoms(&self) -> bool {
        matches!(self, Self::Atoms(_))
    }
}

impl fmt::Display for Proportion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atoms(n) => write!(f, "{n} atoms"),
            Self::MassFraction(w) => write!(f, "mass fraction {w}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeRecord {
    pub name: String,
    pub atomic_number: u32,
    pub mass_number: u32,
    /// g/mol
    pub molar_mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub name: String,
    pub symbol: String,
    pub atomic_number: u32,
    /// g/mol
    pub molar_mass: f64,
    /// Set when the element is a single isotope at 100% abundance.
    pub isotope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub element: String,
    pub proportion: Proportion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    /// g/cm³
    pub density: f64,
    pub state: MaterialState,
    /// Kelvin
    pub temperature: Option<f64>,
    /// Pascal
    pub pressure: Option<f64>,
    pub components: Vec<ComponentRecord>,
}

/// The registry's three entity lists, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub materials: Vec<MaterialRecord>,
    pub elements: Vec<ElementRecord>,
    pub isotopes: Vec<IsotopeRecord>,
}
