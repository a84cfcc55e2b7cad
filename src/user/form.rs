use std::fmt;

use crate::domain::{Status, User, UserPayload};
use crate::forms::{EntityForm, FieldErrors, Validation};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Account form. Password fields are left blank when editing an account
/// whose password should stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub email: String,
    pub phone: String,
    pub role_id: String,
    pub password: String,
    pub password_confirmation: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    PaternalSurname,
    MaternalSurname,
    Email,
    Phone,
    Role,
    Password,
    PasswordConfirmation,
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserField::Name => "nombre",
            UserField::PaternalSurname => "apellidoPaterno",
            UserField::MaternalSurname => "apellidoMaterno",
            UserField::Email => "correo",
            UserField::Phone => "telefono",
            UserField::Role => "idRol",
            UserField::Password => "contrasena",
            UserField::PasswordConfirmation => "confirmarContrasena",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEdit {
    Name(String),
    PaternalSurname(String),
    MaternalSurname(String),
    Email(String),
    Phone(String),
    Role(String),
    Password(String),
    PasswordConfirmation(String),
    Status(Status),
}

impl EntityForm for UserForm {
    type Entity = User;
    type Field = UserField;
    type Edit = UserEdit;

    const NAME: &'static str = "user";

    fn apply(mut self, edit: UserEdit) -> Self {
        match edit {
            UserEdit::Name(v) => self.name = v,
            UserEdit::PaternalSurname(v) => self.paternal_surname = v,
            UserEdit::MaternalSurname(v) => self.maternal_surname = v,
            UserEdit::Email(v) => self.email = v,
            UserEdit::Phone(v) => self.phone = v,
            UserEdit::Role(v) => self.role_id = v,
            UserEdit::Password(v) => self.password = v,
            UserEdit::PasswordConfirmation(v) => self.password_confirmation = v,
            UserEdit::Status(v) => self.status = v,
        }
        self
    }

    fn validate(&self) -> FieldErrors<UserField> {
        let mut validation = Validation::new()
            .required(UserField::Name, &self.name)
            .required(UserField::PaternalSurname, &self.paternal_surname)
            .required(UserField::MaternalSurname, &self.maternal_surname)
            .email(UserField::Email, &self.email)
            .phone(UserField::Phone, &self.phone)
            .required(UserField::Role, &self.role_id);
        if !self.password.is_empty() || !self.password_confirmation.is_empty() {
            validation = validation
                .min_len(UserField::Password, &self.password, MIN_PASSWORD_LEN)
                .matches(UserField::PasswordConfirmation, &self.password_confirmation, &self.password);
        }
        validation.finish()
    }

    /// New accounts need a password.
    fn validate_new(&self) -> FieldErrors<UserField> {
        let mut errors = Validation::new().required(UserField::Password, &self.password).finish();
        errors.merge(self.validate());
        errors
    }

    fn from_entity(entity: &User) -> Self {
        let p = &entity.payload;
        Self {
            name: p.name.clone(),
            paternal_surname: p.paternal_surname.clone(),
            maternal_surname: p.maternal_surname.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            role_id: p.role_id.clone(),
            password: String::new(),
            password_confirmation: String::new(),
            status: p.status,
        }
    }

    fn to_payload(&self) -> Result<UserPayload, FieldErrors<UserField>> {
        Ok(UserPayload {
            name: self.name.trim().to_string(),
            paternal_surname: self.paternal_surname.trim().to_string(),
            maternal_surname: self.maternal_surname.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.clone(),
            role_id: self.role_id.clone(),
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            status: self.status,
        })
    }
}
