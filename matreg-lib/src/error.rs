use thiserror::Error;

/// Reasons a registry operation is rejected.
///
/// Every variant leaves the registry exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("material {0} already exists")]
    DuplicateName(String),

    #[error("no elements specified in formula or empty formula: \"{0}\"")]
    EmptyFormula(String),

    #[error("material {name}: no construction path for state '{state}' (temperature {temperature:?}, pressure {pressure:?})")]
    InvalidState {
        name: String,
        state: String,
        temperature: Option<f64>,
        pressure: Option<f64>,
    },

    #[error("invalid element '{symbol}' in material formula \"{formula}\"")]
    UnknownElement { symbol: String, formula: String },

    #[error("invalid proportion '{suffix}' in formula component '{component}'")]
    InvalidProportion { component: String, suffix: String },

    #[error("invalid isotope annotation in formula component '{0}'")]
    InvalidIsotope(String),

    #[error("formula \"{0}\" mixes atom counts and mass fractions")]
    MixedProportions(String),

    #[error("catalog material {0} is unknown")]
    UnknownCatalogMaterial(String),

    #[error("invalid material index {index} (registry holds {count})")]
    InvalidIndex { index: i64, count: usize },

    #[error("cannot delete material {0}: materials cannot be removed once defined")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Failure to turn a command line into a [`crate::command::Command`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("command {command}: missing parameter <{parameter}>")]
    MissingParameter {
        command: &'static str,
        parameter: &'static str,
    },

    #[error("command {command}: invalid value '{value}' for <{parameter}>")]
    InvalidParameter {
        command: &'static str,
        parameter: &'static str,
        value: String,
    },

    #[error("command {0}: too many parameters")]
    TooManyParameters(&'static str),
}
