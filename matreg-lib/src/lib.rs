pub mod catalog;
pub mod command;
pub mod error;
pub mod formula;
pub mod material;
pub mod namespace;
pub mod periodic_table;
pub mod registry;
pub mod units;

pub use catalog::{CatalogCategory, CatalogFilter, MaterialCatalog, NistCatalog};
pub use command::Command;
pub use error::{CommandError, RegistryError, Result};
pub use formula::{FormulaComponent, parse_formula};
pub use material::{Component, Element, Isotope, Material};
pub use matreg_data;
pub use matreg_data::{MaterialState, Proportion, RegistrySnapshot};
pub use namespace::{Namespace, SharedNamespace};
pub use registry::{AddMaterialRequest, MaterialRegistry};
