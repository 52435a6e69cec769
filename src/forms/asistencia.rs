//! Formulario de registro de asistencia.

use chrono::NaiveDate;

use crate::api::dto::AsistenciaCreate;
use crate::error::ValidationError;

#[derive(Debug, Clone)]
pub struct AsistenciaForm {
    pub profesora_id: Option<i64>,
    pub fecha: NaiveDate,
    pub presente: bool,
    pub observaciones: String,
}

impl AsistenciaForm {
    /// Por defecto: hoy, presente, sin observaciones.
    pub fn nueva(hoy: NaiveDate) -> Self {
        Self {
            profesora_id: None,
            fecha: hoy,
            presente: true,
            observaciones: String::new(),
        }
    }

    pub fn payload(&self) -> Result<AsistenciaCreate, ValidationError> {
        let profesora_id = self.profesora_id.ok_or(ValidationError::CamposIncompletos)?;
        let observaciones = match self.observaciones.trim() {
            "" => None,
            texto => Some(texto.to_string()),
        };
        Ok(AsistenciaCreate::nueva(
            profesora_id,
            self.fecha,
            self.presente,
            observaciones,
        ))
    }
}
