use std::str::FromStr;

use anyhow::anyhow;

/// Sort order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Order {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Parse an order value leniently. An unrecognized value falls back to
    /// ascending with a logged warning instead of failing the run.
    pub fn parse_lenient(value: &str) -> Order {
        match Order::from_str(value) {
            Ok(order) => order,
            Err(_) => {
                log::warn!("Unrecognized order '{}', using ascending", value);
                Order::Asc
            }
        }
    }
}

impl FromStr for Order {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Asc),
            "desc" | "descending" => Ok(Order::Desc),
            other => Err(anyhow!("not an order: {other}")),
        }
    }
}
