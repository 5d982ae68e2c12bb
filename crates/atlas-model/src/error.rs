use thiserror::Error;

use crate::country::Field;

/// Recoverable, user-facing failures of record validation and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryError {
    #[error("el campo {field} no puede estar vacío")]
    EmptyField { field: Field },
    #[error("el {field} contiene caracteres no permitidos: {value:?}")]
    InvalidLabel { field: Field, value: String },
    #[error("valor fuera de rango para {field}: {value} ({rule})")]
    InvalidRange {
        field: Field,
        value: i64,
        rule: &'static str,
    },
    #[error("ya existe un país con ese nombre: {0}")]
    DuplicateName(String),
    #[error("país no encontrado: {0}")]
    NotFound(String),
    #[error("{field} inválida: {value:?} (se esperaba un entero ≥ 0; puntos y comas aceptados)")]
    InvalidNumber { field: Field, value: String },
    #[error("rango inválido: mínimo {min} mayor que máximo {max}")]
    InvertedRange { min: u64, max: u64 },
}

impl CountryError {
    /// The field the failure refers to, when there is one.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::EmptyField { field }
            | Self::InvalidLabel { field, .. }
            | Self::InvalidRange { field, .. }
            | Self::InvalidNumber { field, .. } => Some(*field),
            Self::DuplicateName(_) | Self::NotFound(_) => Some(Field::Name),
            Self::InvertedRange { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CountryError>;
