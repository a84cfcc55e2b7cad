use std::fmt;

use crate::domain::{Product, ProductPayload, Status};
use crate::forms::{EntityForm, FieldErrors, Validation};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Unit,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductField::Name => "nombre",
            ProductField::Unit => "unidadMedida",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductEdit {
    Name(String),
    Description(String),
    Unit(String),
    Status(Status),
}

impl EntityForm for ProductForm {
    type Entity = Product;
    type Field = ProductField;
    type Edit = ProductEdit;

    const NAME: &'static str = "product";

    fn apply(mut self, edit: ProductEdit) -> Self {
        match edit {
            ProductEdit::Name(v) => self.name = v,
            ProductEdit::Description(v) => self.description = v,
            ProductEdit::Unit(v) => self.unit = v,
            ProductEdit::Status(v) => self.status = v,
        }
        self
    }

    fn validate(&self) -> FieldErrors<ProductField> {
        Validation::new()
            .required(ProductField::Name, &self.name)
            .required(ProductField::Unit, &self.unit)
            .finish()
    }

    fn from_entity(entity: &Product) -> Self {
        let p = &entity.payload;
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            unit: p.unit.clone(),
            status: p.status,
        }
    }

    fn to_payload(&self) -> Result<ProductPayload, FieldErrors<ProductField>> {
        Ok(ProductPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            unit: self.unit.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldError;

    #[test]
    fn test_name_and_unit_are_required() {
        let form = ProductForm::default().apply(ProductEdit::Description("Caja con 12".into()));
        let errors = form.validate();
        assert_eq!(errors.get(ProductField::Name), Some(FieldError::Blank));
        assert_eq!(errors.get(ProductField::Unit), Some(FieldError::Blank));
    }

    #[test]
    fn test_payload_is_trimmed() {
        let form = ProductForm::default()
            .apply(ProductEdit::Name("  Cubrebocas ".into()))
            .apply(ProductEdit::Unit("caja".into()))
            .apply(ProductEdit::Status(Status::Inactive));
        assert!(form.validate().is_valid());

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.name, "Cubrebocas");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["unidadMedida"], "caja");
        assert_eq!(json["estatus"], 0);
    }
}
