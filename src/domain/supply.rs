use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Searchable, Status};

/// One inventory batch of a supply (medicine, food, hygiene items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyBatch {
    #[serde(rename = "idInventario")]
    pub id: String,
    #[serde(flatten)]
    pub payload: SupplyBatchPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyBatchPayload {
    #[serde(rename = "idInsumo")]
    pub supply_id: String,
    #[serde(rename = "nombreInsumo", default)]
    pub supply_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    /// Non-perishable batches have no expiration date.
    #[serde(rename = "fechaCaducidad")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(rename = "tipoAdquisicion")]
    pub acquisition: AcquisitionType,
    #[serde(rename = "estatus")]
    pub status: Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquisitionType {
    #[default]
    #[serde(rename = "Donacion")]
    Donation,
    #[serde(rename = "Compra")]
    Purchase,
}

impl AcquisitionType {
    /// Matches the labels shown in the acquisition dropdown, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "donacion" | "donación" | "donation" => Some(AcquisitionType::Donation),
            "compra" | "purchase" => Some(AcquisitionType::Purchase),
            _ => None,
        }
    }
}

impl fmt::Display for AcquisitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionType::Donation => write!(f, "Donacion"),
            AcquisitionType::Purchase => write!(f, "Compra"),
        }
    }
}

impl Searchable for SupplyBatch {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.payload.supply_name)
    }

    fn status(&self) -> Option<Status> {
        Some(self.payload.status)
    }
}
