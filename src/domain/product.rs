use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{Searchable, Status};

/// Catalog entry that supply batches refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "idInsumo")]
    pub id: String,
    #[serde(flatten)]
    pub payload: ProductPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "unidadMedida")]
    pub unit: String,
    #[serde(rename = "estatus")]
    pub status: Status,
}

impl Searchable for Product {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.payload.name)
    }

    fn status(&self) -> Option<Status> {
        Some(self.payload.status)
    }
}
