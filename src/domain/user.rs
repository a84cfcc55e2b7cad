use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{Searchable, Status};

/// Staff account of the administrative app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: String,
    #[serde(flatten)]
    pub payload: UserPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidoPaterno")]
    pub paternal_surname: String,
    #[serde(rename = "apellidoMaterno")]
    pub maternal_surname: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "idRol")]
    pub role_id: String,
    /// Only sent when setting or changing the password.
    #[serde(rename = "contrasena", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "estatus")]
    pub status: Status,
}

impl Searchable for User {
    fn search_text(&self) -> Cow<'_, str> {
        let p = &self.payload;
        Cow::Owned(format!("{} {} {} {}", p.name, p.paternal_surname, p.maternal_surname, p.email))
    }

    fn status(&self) -> Option<Status> {
        Some(self.payload.status)
    }
}
