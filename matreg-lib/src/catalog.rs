use std::fmt::Write;
use std::sync::Arc;

use log::debug;
use matreg_data::{MaterialState, Proportion};

use crate::material::{Element, Material};
use crate::namespace::Namespace;
use crate::periodic_table;
use crate::units::{Density, UNIVERSE_MEAN_DENSITY};

/// Source of predefined materials addressable by name.
pub trait MaterialCatalog {
    /// Returns the named material, building and registering it in
    /// `namespace` on first request. `None` if the catalog has no such entry.
    fn find_or_build(&self, name: &str, namespace: &mut Namespace) -> Option<Arc<Material>>;

    /// Human-readable listing of the entries matching `filter`.
    fn list(&self, filter: CatalogFilter) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCategory {
    Simple,
    Compound,
    Hep,
}

impl CatalogCategory {
    fn heading(self) -> &'static str {
        match self {
            Self::Simple => "### Simple Materials from the NIST Data Base ###",
            Self::Compound => "### Compound Materials from the NIST Data Base ###",
            Self::Hep => "### HEP and Nuclear Materials ###",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    #[default]
    All,
    Simple,
    Compound,
    Hep,
}

impl CatalogFilter {
    /// Parses one of `all`, `simple`, `compound`, `hep`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "simple" => Some(Self::Simple),
            "compound" => Some(Self::Compound),
            "hep" => Some(Self::Hep),
            _ => None,
        }
    }

    pub fn matches(self, category: CatalogCategory) -> bool {
        match self {
            Self::All => true,
            Self::Simple => category == CatalogCategory::Simple,
            Self::Compound => category == CatalogCategory::Compound,
            Self::Hep => category == CatalogCategory::Hep,
        }
    }
}

struct CatalogEntry {
    name: &'static str,
    category: CatalogCategory,
    /// g/cm³
    density: f64,
    state: MaterialState,
    /// (Z, weight); weights are atom counts when `by_atoms`, else mass fractions
    components: &'static [(u32, f64)],
    by_atoms: bool,
    /// (temperature K, pressure Pa)
    conditions: Option<(f64, f64)>,
}

const fn simple(name: &'static str, density: f64, z: &'static [(u32, f64)]) -> CatalogEntry {
    CatalogEntry {
        name,
        category: CatalogCategory::Simple,
        density,
        state: MaterialState::Solid,
        components: z,
        by_atoms: true,
        conditions: None,
    }
}

const fn simple_gas(name: &'static str, density: f64, z: &'static [(u32, f64)]) -> CatalogEntry {
    CatalogEntry {
        state: MaterialState::Gas,
        ..simple(name, density, z)
    }
}

const fn compound(
    name: &'static str,
    density: f64,
    components: &'static [(u32, f64)],
    by_atoms: bool,
) -> CatalogEntry {
    CatalogEntry {
        name,
        category: CatalogCategory::Compound,
        density,
        state: MaterialState::Undefined,
        components,
        by_atoms,
        conditions: None,
    }
}

const fn hep(
    name: &'static str,
    density: f64,
    components: &'static [(u32, f64)],
    by_atoms: bool,
) -> CatalogEntry {
    CatalogEntry {
        category: CatalogCategory::Hep,
        ..compound(name, density, components, by_atoms)
    }
}

/// Embedded NIST reference materials, each entry: name, density, composition.
const NIST_MATERIALS: &[CatalogEntry] = &[
    simple_gas("G4_H", 8.37480e-5, &[(1, 1.0)]),
    simple_gas("G4_He", 1.66322e-4, &[(2, 1.0)]),
    simple("G4_Li", 0.534, &[(3, 1.0)]),
    simple("G4_Be", 1.848, &[(4, 1.0)]),
    simple("G4_B", 2.37, &[(5, 1.0)]),
    simple("G4_C", 2.0, &[(6, 1.0)]),
    simple_gas("G4_N", 1.16520e-3, &[(7, 1.0)]),
    simple_gas("G4_O", 1.33151e-3, &[(8, 1.0)]),
    simple_gas("G4_F", 1.58029e-3, &[(9, 1.0)]),
    simple_gas("G4_Ne", 8.38505e-4, &[(10, 1.0)]),
    simple("G4_Na", 0.971, &[(11, 1.0)]),
    simple("G4_Mg", 1.74, &[(12, 1.0)]),
    simple("G4_Al", 2.699, &[(13, 1.0)]),
    simple("G4_Si", 2.33, &[(14, 1.0)]),
    simple("G4_P", 2.2, &[(15, 1.0)]),
    simple("G4_S", 2.0, &[(16, 1.0)]),
    simple_gas("G4_Ar", 1.66201e-3, &[(18, 1.0)]),
    simple("G4_Ti", 4.54, &[(22, 1.0)]),
    simple("G4_Fe", 7.874, &[(26, 1.0)]),
    simple("G4_Cu", 8.96, &[(29, 1.0)]),
    simple("G4_Ge", 5.323, &[(32, 1.0)]),
    simple("G4_Ag", 10.5, &[(47, 1.0)]),
    simple("G4_Sn", 7.31, &[(50, 1.0)]),
    simple("G4_W", 19.3, &[(74, 1.0)]),
    simple("G4_Au", 19.32, &[(79, 1.0)]),
    simple("G4_Pb", 11.35, &[(82, 1.0)]),
    simple("G4_U", 18.95, &[(92, 1.0)]),
    CatalogEntry {
        state: MaterialState::Gas,
        ..compound(
            "G4_AIR",
            1.20479e-3,
            &[(6, 0.000124), (7, 0.755268), (8, 0.231781), (18, 0.012827)],
            false,
        )
    },
    compound("G4_WATER", 1.0, &[(1, 2.0), (8, 1.0)], true),
    compound("G4_ALUMINUM_OXIDE", 3.97, &[(13, 2.0), (8, 3.0)], true),
    compound("G4_SILICON_DIOXIDE", 2.32, &[(14, 1.0), (8, 2.0)], true),
    compound("G4_POLYETHYLENE", 0.94, &[(6, 1.0), (1, 2.0)], true),
    compound("G4_PLEXIGLASS", 1.19, &[(1, 8.0), (6, 5.0), (8, 2.0)], true),
    compound(
        "G4_KAPTON",
        1.42,
        &[(1, 0.026362), (6, 0.691133), (7, 0.07327), (8, 0.209235)],
        false,
    ),
    compound(
        "G4_MYLAR",
        1.4,
        &[(1, 0.041959), (6, 0.625017), (8, 0.333025)],
        false,
    ),
    compound(
        "G4_GLASS_PLATE",
        2.4,
        &[(8, 0.4598), (11, 0.0964), (14, 0.3365), (20, 0.1072)],
        false,
    ),
    compound(
        "G4_CONCRETE",
        2.3,
        &[
            (1, 0.01),
            (6, 0.001),
            (8, 0.529107),
            (11, 0.016),
            (12, 0.002),
            (13, 0.033872),
            (14, 0.337021),
            (19, 0.013),
            (20, 0.044),
            (26, 0.014),
        ],
        false,
    ),
    compound("G4_CESIUM_IODIDE", 4.51, &[(55, 1.0), (53, 1.0)], true),
    compound("G4_SODIUM_IODIDE", 3.667, &[(11, 1.0), (53, 1.0)], true),
    compound("G4_GALLIUM_ARSENIDE", 5.31, &[(31, 1.0), (33, 1.0)], true),
    compound("G4_CADMIUM_TELLURIDE", 6.2, &[(48, 1.0), (52, 1.0)], true),
    compound("G4_BGO", 7.13, &[(83, 4.0), (32, 3.0), (8, 12.0)], true),
    hep("G4_lH2", 0.0708, &[(1, 1.0)], true),
    hep("G4_lN2", 0.807, &[(7, 1.0)], true),
    hep("G4_lO2", 1.141, &[(8, 1.0)], true),
    hep("G4_lAr", 1.396, &[(18, 1.0)], true),
    hep("G4_PbWO4", 8.28, &[(82, 1.0), (74, 1.0), (8, 4.0)], true),
    hep(
        "G4_STAINLESS-STEEL",
        8.0,
        &[(26, 74.0), (24, 18.0), (28, 8.0)],
        true,
    ),
    hep("G4_BRASS", 8.52, &[(29, 62.0), (30, 35.0), (82, 3.0)], true),
    CatalogEntry {
        state: MaterialState::Gas,
        conditions: Some((2.73, 3.0e-18)),
        ..hep("G4_Galactic", UNIVERSE_MEAN_DENSITY, &[(1, 1.0)], true)
    },
];

/// The standard-reference catalog of NIST materials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NistCatalog;

impl NistCatalog {
    /// Names of all entries, in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        NIST_MATERIALS.iter().map(|e| e.name)
    }

    fn entry(name: &str) -> Option<&'static CatalogEntry> {
        NIST_MATERIALS.iter().find(|e| e.name == name)
    }

    fn build(entry: &CatalogEntry, namespace: &mut Namespace) -> Material {
        let (temperature, pressure) = entry.conditions.unzip();

        entry.components.iter().fold(
            Material::new(entry.name, entry.density).with_state(entry.state, temperature, pressure),
            |material, &(z, weight)| {
                let index = z as usize - 1;
                let symbol = periodic_table::symbol(index);
                let (element, _) = namespace.element_or_insert_with(symbol, || {
                    Element::natural(symbol, symbol, z, periodic_table::atomic_mass(index))
                });
                let proportion = if entry.by_atoms {
                    Proportion::Atoms(weight as u32)
                } else {
                    Proportion::MassFraction(weight)
                };
                material.with_component(element, proportion)
            },
        )
    }
}

impl MaterialCatalog for NistCatalog {
    fn find_or_build(&self, name: &str, namespace: &mut Namespace) -> Option<Arc<Material>> {
        let entry = Self::entry(name)?;
        if let Some(existing) = namespace.catalog_material(name) {
            return Some(existing);
        }
        if namespace.contains_material(name) {
            debug!("{name} is already defined outside the catalog");
            return None;
        }
        debug!("building catalog material {name}");
        let material = Self::build(entry, namespace);
        namespace.register_catalog_material(material)
    }

    fn list(&self, filter: CatalogFilter) -> String {
        let mut out = String::new();
        for category in [
            CatalogCategory::Simple,
            CatalogCategory::Compound,
            CatalogCategory::Hep,
        ] {
            if !filter.matches(category) {
                continue;
            }
            let _ = writeln!(out, "\n{}", category.heading());
            let _ = writeln!(out, " Ncomp             Name      density");
            for entry in NIST_MATERIALS.iter().filter(|e| e.category == category) {
                let _ = writeln!(
                    out,
                    "{:>6} {:>20}  {}",
                    entry.components.len(),
                    entry.name,
                    Density(entry.density)
                );
            }
        }
        out
    }
}
