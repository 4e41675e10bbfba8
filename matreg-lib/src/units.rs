use std::fmt;

/// Mean density of the universe (g/cm³), used for the vacuum material.
pub const UNIVERSE_MEAN_DENSITY: f64 = 1.0e-25;

/// Normal temperature (K).
pub const NTP_TEMPERATURE: f64 = 293.15;

/// Density units offered for display, largest first, as (symbol, size in g/cm³).
const DENSITY_UNITS: &[(&str, f64)] = &[("g/cm3", 1.0), ("mg/cm3", 1.0e-3)];

/// Density in g/cm³ that formats itself in the most readable unit.
///
/// The largest unit giving a magnitude of at least one wins; values smaller
/// than every unit fall back to the smallest one. Three significant digits.
///
/// # Examples
/// ```
/// use matreg::units::Density;
/// assert_eq!(Density(2.7).to_string(), "2.7 g/cm3");
/// assert_eq!(Density(0.00129).to_string(), "1.29 mg/cm3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(pub f64);

impl Density {
    pub fn best_unit(self) -> (f64, &'static str) {
        let magnitude = self.0.abs();
        let chosen = DENSITY_UNITS
            .iter()
            .find(|(_, size)| magnitude >= *size)
            .or(DENSITY_UNITS.last());

        match chosen {
            Some(&(unit, size)) => (self.0 / size, unit),
            None => (self.0, "g/cm3"),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, unit) = self.best_unit();
        write!(f, "{} {unit}", significant(value, 3))
    }
}

/// Formats like C's `%g`: fixed notation for moderate exponents, scientific
/// otherwise, trailing zeros removed.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }

    // exponent after rounding, so 999.96 becomes 1e3 rather than 1000
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
    else {
        return scientific;
    };

    if exponent < -4 || exponent >= digits as i32 {
        format!("{}e{exponent}", trim_zeros(mantissa))
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_unit() {
        assert_eq!(Density(2.7).best_unit(), (2.7, "g/cm3"));
        let (value, unit) = Density(0.00129).best_unit();
        assert_eq!(unit, "mg/cm3");
        assert!((value - 1.29).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_density_uses_smallest_unit() {
        assert_eq!(Density(UNIVERSE_MEAN_DENSITY).to_string(), "1e-22 mg/cm3");
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant(2.329, 3), "2.33");
        assert_eq!(significant(19.32, 3), "19.3");
        assert_eq!(significant(1.0, 3), "1");
        assert_eq!(significant(1234.0, 3), "1.23e3");
        assert_eq!(significant(0.5, 3), "0.5");
    }

    #[test]
    fn test_rounding_carry_keeps_three_digits() {
        assert_eq!(significant(9.9996, 3), "10");
        assert_eq!(significant(999.96, 3), "1e3");
        assert_eq!(Density(0.99996).to_string(), "1e3 mg/cm3");
        assert_eq!(Density(0.0099996).to_string(), "10 mg/cm3");
    }
}
