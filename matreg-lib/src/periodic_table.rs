//! Fixed periodic table used to resolve formula symbols.
//!
//! Symbols are stored two characters wide with one-letter symbols
//! left-padded by a space, once per letter case. Index `i` holds the
//! element with atomic number `i + 1`; the last slot is a placeholder.

pub const ELEMENT_COUNT: usize = 110;

const TITLE_CASE: [&str; ELEMENT_COUNT] = [
    " H", "He", "Li", "Be", " B", " C", " N", " O", " F", "Ne", "Na", "Mg", "Al", "Si", " P", " S",
    "Cl", "Ar", " K", "Ca", "Sc", "Ti", " V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", " Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", " I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", " W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", " U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "UN",
];

const LOWER_CASE: [&str; ELEMENT_COUNT] = [
    " h", "he", "li", "be", " b", " c", " n", " o", " f", "ne", "na", "mg", "al", "si", " p", " s",
    "cl", "ar", " k", "ca", "sc", "ti", " v", "cr", "mn", "fe", "co", "ni", "cu", "zn", "ga", "ge",
    "as", "se", "br", "kr", "rb", "sr", " y", "zr", "nb", "mo", "tc", "ru", "rh", "pd", "ag", "cd",
    "in", "sn", "sb", "te", " i", "xe", "cs", "ba", "la", "ce", "pr", "nd", "pm", "sm", "eu", "gd",
    "tb", "dy", "ho", "er", "tm", "yb", "lu", "hf", "ta", " w", "re", "os", "ir", "pt", "au", "hg",
    "tl", "pb", "bi", "po", "at", "rn", "fr", "ra", "ac", "th", "pa", " u", "np", "pu", "am", "cm",
    "bk", "cf", "es", "fm", "md", "no", "lr", "rf", "db", "sg", "bh", "hs", "mt", "un",
];

const UPPER_CASE: [&str; ELEMENT_COUNT] = [
    " H", "HE", "LI", "BE", " B", " C", " N", " O", " F", "NE", "NA", "MG", "AL", "SI", " P", " S",
    "CL", "AR", " K", "CA", "SC", "TI", " V", "CR", "MN", "FE", "CO", "NI", "CU", "ZN", "GA", "GE",
    "AS", "SE", "BR", "KR", "RB", "SR", " Y", "ZR", "NB", "MO", "TC", "RU", "RH", "PD", "AG", "CD",
    "IN", "SN", "SB", "TE", " I", "XE", "CS", "BA", "LA", "CE", "PR", "ND", "PM", "SM", "EU", "GD",
    "TB", "DY", "HO", "ER", "TM", "YB", "LU", "HF", "TA", " W", "RE", "OS", "IR", "PT", "AU", "HG",
    "TL", "PB", "BI", "PO", "AT", "RN", "FR", "RA", "AC", "TH", "PA", " U", "NP", "PU", "AM", "CM",
    "BK", "CF", "ES", "FM", "MD", "NO", "LR", "RF", "DB", "SG", "BH", "HS", "MT", "UN",
];

/// Relative atomic masses (g/mol).
const ATOMIC_MASS: [f64; ELEMENT_COUNT] = [
    1.00794, 4.002602, 6.941, 9.012182, 10.811, 12.0107, 14.00674, 15.9994, 18.9984, 20.1797,
    22.98977, 24.3050, 26.9815, 28.0855, 30.973761, 32.066, 35.4527, 39.948, 39.0983, 40.078,
    44.95591, 47.867, 50.9415, 51.9961, 54.938049, 55.845, 58.9332, 58.6934, 63.546, 65.39,
    69.723, 72.61, 74.9216, 78.96, 79.904, 83.8, 85.4678, 87.62, 88.90585, 91.224,
    92.90638, 95.94, 97.9072, 101.07, 102.9055, 106.42, 107.8682, 112.411, 114.818, 118.71,
    121.76, 127.6, 126.90447, 131.29, 132.90545, 137.327, 138.9055, 140.116, 140.90765, 144.24,
    144.9127, 150.36, 151.964, 157.25, 158.92534, 162.5, 164.93032, 167.26, 168.93421, 173.04,
    174.967, 178.49, 180.9479, 183.84, 186.207, 190.23, 192.217, 195.078, 196.96655, 200.59,
    204.3833, 207.2, 208.98038, 208.9824, 209.9871, 222.0176, 223.0197, 226.0254, 227.0277, 232.038,
    231.03588, 238.0289, 237.0482, 244.0642, 243.0614, 247.0703, 247.0703, 251.0796, 252.083,
    257.0951, 258.0984, 259.1011, 262.11, 263.1125, 262.1144, 266.1219, 264.1247, 269.1341,
    268.1388, 272.1463,
];

/// Returns the zero-based table index for an element symbol in title,
/// lower or upper case.
///
/// # Examples
/// ```
/// use matreg::periodic_table::lookup;
/// assert_eq!(lookup("Fe"), Some(25));
/// assert_eq!(lookup("fe"), lookup("FE"));
/// assert_eq!(lookup("h"), Some(0));
/// assert_eq!(lookup("Xx"), None);
/// ```
pub fn lookup(symbol: &str) -> Option<usize> {
    let padded;
    let key = if symbol.chars().count() == 1 {
        padded = format!(" {symbol}");
        padded.as_str()
    } else {
        symbol
    };

    [&TITLE_CASE, &LOWER_CASE, &UPPER_CASE]
        .into_iter()
        .find_map(|table| table.iter().position(|&entry| entry == key))
}

/// Title-case symbol without padding, e.g. `"H"` or `"Fe"`.
///
/// Panics if `index >= ELEMENT_COUNT`.
pub fn symbol(index: usize) -> &'static str {
    TITLE_CASE[index].trim_start()
}

pub fn atomic_number(index: usize) -> u32 {
    index as u32 + 1
}

/// Panics if `index >= ELEMENT_COUNT`.
pub fn atomic_mass(index: usize) -> f64 {
    ATOMIC_MASS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variants_agree() {
        for i in 0..ELEMENT_COUNT {
            let title = lookup(TITLE_CASE[i].trim_start());
            assert_eq!(title, Some(i), "title {}", TITLE_CASE[i]);
            assert_eq!(lookup(LOWER_CASE[i].trim_start()), title);
            assert_eq!(lookup(UPPER_CASE[i].trim_start()), title);
        }
    }

    #[test]
    fn test_symbols_unique() {
        for i in 0..ELEMENT_COUNT {
            for j in (i + 1)..ELEMENT_COUNT {
                assert_ne!(TITLE_CASE[i], TITLE_CASE[j]);
            }
        }
    }

    #[test]
    fn test_single_letter_padding() {
        assert_eq!(lookup("C"), Some(5));
        assert_eq!(lookup("c"), Some(5));
        assert_eq!(lookup(" C"), Some(5));
        assert_eq!(lookup("U"), Some(91));
    }

    #[test]
    fn test_co_vs_co() {
        assert_eq!(lookup("Co"), Some(26));
        assert_eq!(lookup("CO"), Some(26));
        assert_eq!(lookup("co"), Some(26));
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("Xx"), None);
        assert_eq!(lookup("Fee"), None);
        // mixed case outside the three tables
        assert_eq!(lookup("fE"), None);
        assert_eq!(lookup("2"), None);
    }

    #[test]
    fn test_accessors() {
        let fe = lookup("Fe").unwrap();
        assert_eq!(symbol(fe), "Fe");
        assert_eq!(atomic_number(fe), 26);
        assert_eq!(atomic_mass(fe), 55.845);
        assert_eq!(symbol(0), "H");
        assert_eq!(symbol(ELEMENT_COUNT - 1), "UN");
    }
}
