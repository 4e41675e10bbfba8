use matreg_data::Proportion;

use crate::error::{RegistryError, Result};
use crate::periodic_table;

/// Separator between formula components, e.g. `H2-O`.
pub const COMPONENT_SEPARATOR: char = '-';

/// One resolved `-`-separated formula component.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaComponent {
    /// Periodic table index (atomic number minus one).
    pub element: usize,
    /// Present when the component names a single isotope, e.g. `Fe(56)`.
    pub mass_number: Option<u32>,
    pub proportion: Proportion,
}

impl FormulaComponent {
    pub fn symbol(&self) -> &'static str {
        periodic_table::symbol(self.element)
    }

    /// `<Symbol><A>` for isotope components, e.g. `Fe56`.
    pub fn isotope_name(&self) -> Option<String> {
        self.mass_number.map(|a| format!("{}{a}", self.symbol()))
    }
}

/// Splits a formula into its non-empty components.
///
/// Consecutive separators collapse, so `"H2--O"` has two components.
pub fn split_components(formula: &str) -> impl Iterator<Item = &str> {
    formula
        .split(COMPONENT_SEPARATOR)
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

/// Parse a formula such as `H2-O`, `C.5-O.5` or `Fe(56)2-O3`.
///
/// Each component is `<Symbol>[(<MassNumber>)][<Count>|<.Fraction>]`.
/// Symbols match case-insensitively. A suffix containing `.` is a mass
/// fraction, any other numeric suffix an atom count, and a missing suffix
/// means one atom. Nothing is created here; the caller gets either every
/// component resolved or the first error.
///
/// # Examples
/// ```
/// use matreg::formula::parse_formula;
/// use matreg::Proportion;
///
/// let water = parse_formula("H2-O").unwrap();
/// assert_eq!(water.len(), 2);
/// assert_eq!(water[0].symbol(), "H");
/// assert_eq!(water[0].proportion, Proportion::Atoms(2));
/// assert_eq!(water[1].proportion, Proportion::Atoms(1));
/// ```
pub fn parse_formula(formula: &str) -> Result<Vec<FormulaComponent>> {
    let components = split_components(formula)
        .map(|c| parse_component(c, formula))
        .collect::<Result<Vec<_>>>()?;

    let Some(first) = components.first() else {
        return Err(RegistryError::EmptyFormula(formula.to_string()));
    };

    let by_atoms = first.proportion.is_atoms();
    if components.iter().any(|c| c.proportion.is_atoms() != by_atoms) {
        return Err(RegistryError::MixedProportions(formula.to_string()));
    }

    Ok(components)
}

/// Returns true if the formula parses and every symbol resolves.
pub fn validate_formula(formula: &str) -> bool {
    parse_formula(formula).is_ok()
}

fn parse_component(component: &str, formula: &str) -> Result<FormulaComponent> {
    match (component.find('('), component.find(')')) {
        (None, None) => parse_plain(component, formula),
        (Some(open), Some(close)) if open < close => {
            parse_isotope(component, formula, open, close)
        }
        _ => Err(RegistryError::InvalidIsotope(component.to_string())),
    }
}

fn parse_plain(component: &str, formula: &str) -> Result<FormulaComponent> {
    let split = component
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(component.len());
    let (symbol, suffix) = component.split_at(split);
    let element = resolve_symbol(symbol, formula)?;

    let proportion = match parse_proportion(component, suffix)? {
        None => Proportion::Atoms(1),
        Some(p) if is_positive(p) => p,
        Some(_) => {
            return Err(RegistryError::InvalidProportion {
                component: component.to_string(),
                suffix: suffix.to_string(),
            });
        }
    };

    Ok(FormulaComponent {
        element,
        mass_number: None,
        proportion,
    })
}

fn parse_isotope(
    component: &str,
    formula: &str,
    open: usize,
    close: usize,
) -> Result<FormulaComponent> {
    let element = resolve_symbol(component[..open].trim(), formula)?;

    // N = A - Z must not be negative
    let z = periodic_table::atomic_number(element);
    let mass_number = component[open + 1..close]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&a| a >= z)
        .ok_or_else(|| RegistryError::InvalidIsotope(component.to_string()))?;

    let proportion = match parse_proportion(component, &component[close + 1..])? {
        Some(p) if is_positive(p) => p,
        _ => Proportion::Atoms(1),
    };

    Ok(FormulaComponent {
        element,
        mass_number: Some(mass_number),
        proportion,
    })
}

fn resolve_symbol(symbol: &str, formula: &str) -> Result<usize> {
    periodic_table::lookup(symbol).ok_or_else(|| RegistryError::UnknownElement {
        symbol: symbol.to_string(),
        formula: formula.to_string(),
    })
}

fn parse_proportion(component: &str, suffix: &str) -> Result<Option<Proportion>> {
    if suffix.is_empty() {
        return Ok(None);
    }

    // a decimal with a non-zero integer part still counts atoms: `H2.0` is two
    let parsed = if suffix.contains('.') {
        suffix
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .map(|w| match w.trunc() {
                n if n >= 1.0 => Proportion::Atoms(n.min(f64::from(u32::MAX)) as u32),
                _ => Proportion::MassFraction(w),
            })
    } else {
        suffix.parse::<u32>().ok().map(Proportion::Atoms)
    };

    parsed.map(Some).ok_or_else(|| RegistryError::InvalidProportion {
        component: component.to_string(),
        suffix: suffix.to_string(),
    })
}

fn is_positive(p: Proportion) -> bool {
    match p {
        Proportion::Atoms(n) => n > 0,
        Proportion::MassFraction(w) => w > 0.0,
    }
}
