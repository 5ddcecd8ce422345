use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit a quantity is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    Pieces,
    Liters,
    Kilograms,
    Grams,
    Cans,
    Bottles,
    Packages,
    Jars,
    Canisters,
    Boxes,
    Days,
    Rolls,
    Tubes,
    Meters,
    Pairs,
    Euros,
    Sets,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Pieces => "pieces",
            Unit::Liters => "liters",
            Unit::Kilograms => "kilograms",
            Unit::Grams => "grams",
            Unit::Cans => "cans",
            Unit::Bottles => "bottles",
            Unit::Packages => "packages",
            Unit::Jars => "jars",
            Unit::Canisters => "canisters",
            Unit::Boxes => "boxes",
            Unit::Days => "days",
            Unit::Rolls => "rolls",
            Unit::Tubes => "tubes",
            Unit::Meters => "meters",
            Unit::Pairs => "pairs",
            Unit::Euros => "euros",
            Unit::Sets => "sets",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
