use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Searchable, Status};

/// A recurring activity offered to beneficiaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    #[serde(rename = "idTaller")]
    pub id: String,
    #[serde(flatten)]
    pub payload: WorkshopPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopPayload {
    #[serde(rename = "nombreTaller")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "horaEntrada")]
    pub start_time: NaiveTime,
    #[serde(rename = "horaSalida")]
    pub end_time: NaiveTime,
    #[serde(rename = "estatus")]
    pub status: Status,
}

impl Searchable for Workshop {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.payload.name)
    }

    fn status(&self) -> Option<Status> {
        Some(self.payload.status)
    }
}
