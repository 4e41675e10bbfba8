//! WASM bindings for matreg.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p matreg-wasm
//! ```

use js_sys::Array;
use wasm_bindgen::prelude::*;

use matreg::{
    AddMaterialRequest, CatalogFilter, Command, MaterialRegistry, MaterialState, NistCatalog,
    RegistryError, SharedNamespace,
};

fn to_js(e: RegistryError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_state(state: Option<String>) -> Result<Option<MaterialState>, JsError> {
    match state.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("") => Ok(None),
        Some("solid") => Ok(Some(MaterialState::Solid)),
        Some("gas") => Ok(Some(MaterialState::Gas)),
        Some(other) => Err(JsError::new(&format!("unknown material state: {other}"))),
    }
}

/// Material registry handle for JavaScript hosts.
///
/// Every handle owns its own namespace, so each one starts with the
/// built-in Vacuum, Air, Aluminium and Silicon materials.
#[wasm_bindgen]
pub struct Registry {
    inner: MaterialRegistry<NistCatalog>,
}

#[wasm_bindgen]
impl Registry {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Registry {
        Registry {
            inner: MaterialRegistry::new(SharedNamespace::new(), NistCatalog),
        }
    }

    // ── Definitions ──

    /// Defines a material from a formula such as `H2-O` or `Fe(56)2-O3`.
    ///
    /// `state` is one of "solid", "gas" or empty; temperature in K,
    /// pressure in Pa. Returns the new material's zero-based index.
    #[wasm_bindgen(js_name = addMaterial)]
    pub fn add_material(
        &mut self,
        name: &str,
        formula: &str,
        density: f64,
        state: Option<String>,
        temperature: Option<f64>,
        pressure: Option<f64>,
    ) -> Result<usize, JsError> {
        let request = AddMaterialRequest {
            state: parse_state(state)?,
            temperature,
            pressure,
            ..AddMaterialRequest::new(name, formula, density)
        };
        self.inner.add_material(&request).map_err(to_js)?;
        Ok(self.inner.material_count() - 1)
    }

    #[wasm_bindgen(js_name = addNistMaterial)]
    pub fn add_nist_material(&mut self, name: &str) -> Result<usize, JsError> {
        self.inner.add_nist_material(name).map_err(to_js)?;
        Ok(self.inner.material_count() - 1)
    }

    /// Always throws: materials cannot be removed once defined.
    #[wasm_bindgen(js_name = deleteMaterial)]
    pub fn delete_material(&mut self, index: i32) -> Result<(), JsError> {
        self.inner.delete_material(i64::from(index)).map_err(to_js)
    }

    /// Always throws: materials cannot be removed once defined.
    #[wasm_bindgen(js_name = deleteMaterialByName)]
    pub fn delete_material_by_name(&mut self, name: &str) -> Result<(), JsError> {
        self.inner.delete_material_by_name(name).map_err(to_js)
    }

    // ── Queries ──

    /// Zero-based index of the named material, or -1.
    #[wasm_bindgen(js_name = materialIndex)]
    pub fn material_index(&self, name: &str) -> i32 {
        self.inner
            .material_index(name)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    #[wasm_bindgen(js_name = materialCount)]
    pub fn material_count(&self) -> usize {
        self.inner.material_count()
    }

    #[wasm_bindgen(js_name = elementCount)]
    pub fn element_count(&self) -> usize {
        self.inner.element_count()
    }

    #[wasm_bindgen(js_name = isotopeCount)]
    pub fn isotope_count(&self) -> usize {
        self.inner.isotope_count()
    }

    /// Names of the registered materials in registration order.
    #[wasm_bindgen(js_name = materialNames)]
    pub fn material_names(&self) -> Array {
        self.inner
            .materials()
            .iter()
            .map(|m| JsValue::from_str(&m.name))
            .collect()
    }

    /// Density (g/cm³) of the material at `index`.
    pub fn density(&self, index: usize) -> Result<f64, JsError> {
        self.inner
            .material(index)
            .map(|m| m.density)
            .ok_or_else(|| JsError::new(&format!("no material at index {index}")))
    }

    // ── Listings ──

    #[wasm_bindgen(js_name = listMaterials)]
    pub fn list_materials(&self) -> String {
        self.inner.list_materials()
    }

    /// `filter` is one of "all", "simple", "compound", "hep".
    #[wasm_bindgen(js_name = listNist)]
    pub fn list_nist(&self, filter: Option<String>) -> Result<String, JsError> {
        let filter = match filter.as_deref() {
            None | Some("") => CatalogFilter::All,
            Some(f) => CatalogFilter::parse(f)
                .ok_or_else(|| JsError::new(&format!("unknown catalog filter: {f}")))?,
        };
        Ok(self.inner.list_nist(filter))
    }

    /// Runs one text command, e.g. `add Water H2-O 1.0`, returning its output.
    pub fn execute(&mut self, line: &str) -> Result<String, JsError> {
        let command: Command = line.parse().map_err(|e: matreg::CommandError| {
            log::warn!("rejected command '{line}': {e}");
            JsError::new(&e.to_string())
        })?;
        self.inner.execute(command).map_err(to_js)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if the formula parses and every symbol resolves.
#[wasm_bindgen(js_name = validateFormula)]
pub fn validate_formula(formula: &str) -> bool {
    matreg::formula::validate_formula(formula)
}
