//! Text command surface for the material registry.
//!
//! One line holds one command with whitespace-separated positional
//! parameters, optionally prefixed by `/geometry/material/`:
//!
//! | Command | Parameters |
//! |---|---|
//! | `add` | name formula density \[state\] \[temperature\] \[pressure\] |
//! | `addNIST` | catalog name |
//! | `listNIST` | \[all \| simple \| compound \| hep\] |
//! | `delete` | 1-based index |
//! | `deleteName` | name |
//! | `list` | |

use std::str::FromStr;

use matreg_data::MaterialState;

use crate::catalog::{CatalogFilter, MaterialCatalog};
use crate::error::{CommandError, Result};
use crate::registry::{AddMaterialRequest, MaterialRegistry};

pub const COMMAND_PREFIX: &str = "/geometry/material/";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddMaterialRequest),
    AddNist(String),
    ListNist(CatalogFilter),
    Delete(i64),
    DeleteName(String),
    List,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        match head.strip_prefix(COMMAND_PREFIX).unwrap_or(head) {
            "add" => parse_add(&args).map(Command::Add),
            "addNIST" => single("addNIST", "NISTmaterial", &args).map(Command::AddNist),
            "listNIST" => {
                let filter = match args.as_slice() {
                    [] => CatalogFilter::All,
                    [value] => CatalogFilter::parse(value).ok_or_else(|| {
                        invalid("listNIST", "type", value)
                    })?,
                    _ => return Err(CommandError::TooManyParameters("listNIST")),
                };
                Ok(Command::ListNist(filter))
            }
            "delete" => {
                let value = single("delete", "matIdx", &args)?;
                value
                    .parse::<i64>()
                    .map(Command::Delete)
                    .map_err(|_| invalid("delete", "matIdx", &value))
            }
            "deleteName" => single("deleteName", "DeleteName", &args).map(Command::DeleteName),
            "list" if args.is_empty() => Ok(Command::List),
            "list" => Err(CommandError::TooManyParameters("list")),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_add(args: &[&str]) -> std::result::Result<AddMaterialRequest, CommandError> {
    const CMD: &str = "add";
    let missing = |parameter| CommandError::MissingParameter {
        command: CMD,
        parameter,
    };

    if args.len() > 6 {
        return Err(CommandError::TooManyParameters(CMD));
    }
    let name = args.first().ok_or_else(|| missing("material"))?;
    let formula = args.get(1).ok_or_else(|| missing("formula"))?;
    let density = args.get(2).ok_or_else(|| missing("density"))?;
    let density = density
        .parse::<f64>()
        .ok()
        .filter(|&d| d > 0.0)
        .ok_or_else(|| invalid(CMD, "density", density))?;

    let state = args
        .get(3)
        .map(|&s| match s {
            "solid" => Ok(MaterialState::Solid),
            "gas" => Ok(MaterialState::Gas),
            _ => Err(invalid(CMD, "state", s)),
        })
        .transpose()?;
    let number = |index: usize, parameter: &'static str| {
        args.get(index)
            .map(|&s| s.parse::<f64>().map_err(|_| invalid(CMD, parameter, s)))
            .transpose()
    };

    Ok(AddMaterialRequest {
        name: name.to_string(),
        formula: formula.to_string(),
        density,
        state,
        temperature: number(4, "temp")?,
        pressure: number(5, "pres")?,
    })
}

fn single(
    command: &'static str,
    parameter: &'static str,
    args: &[&str],
) -> std::result::Result<String, CommandError> {
    match args {
        [] => Err(CommandError::MissingParameter { command, parameter }),
        [value] => Ok(value.to_string()),
        _ => Err(CommandError::TooManyParameters(command)),
    }
}

fn invalid(command: &'static str, parameter: &'static str, value: &str) -> CommandError {
    CommandError::InvalidParameter {
        command,
        parameter,
        value: value.to_string(),
    }
}

impl<C: MaterialCatalog> MaterialRegistry<C> {
    /// Runs one command, returning its output text.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Add(request) => {
                self.add_material(&request)?;
                Ok(self.added_message(&request.name, &request.formula))
            }
            Command::AddNist(name) => {
                self.add_nist_material(&name)?;
                Ok(format!(" Material:{name} added from the NIST tables."))
            }
            Command::ListNist(filter) => Ok(self.list_nist(filter)),
            Command::Delete(index) => self.delete_material(index).map(|()| String::new()),
            Command::DeleteName(name) => {
                self.delete_material_by_name(&name).map(|()| String::new())
            }
            Command::List => Ok(self.list_materials()),
        }
    }
}
