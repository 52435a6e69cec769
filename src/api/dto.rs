//! Cuerpos de petición y respuesta que no son entidades de dominio.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fechas;
use crate::models::{Profesora, Ubicacion};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub profesora: Profesora,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistroProfesora {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub especialidad: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaseCreate {
    pub profesora_id: i64,
    pub titulo: String,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha_inicio: NaiveDateTime,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha_fin: NaiveDateTime,
    pub ubicacion: Ubicacion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// Alta directa de asistencia; `fecha` viaja con la medianoche local.
#[derive(Debug, Clone, Serialize)]
pub struct AsistenciaCreate {
    pub profesora_id: i64,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha: NaiveDateTime,
    pub presente: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl AsistenciaCreate {
    pub fn nueva(
        profesora_id: i64,
        dia: NaiveDate,
        presente: bool,
        observaciones: Option<String>,
    ) -> Self {
        Self {
            profesora_id,
            fecha: dia.and_time(NaiveTime::MIN),
            presente,
            observaciones,
        }
    }
}

/// Cambio puntual del par (aprendiz, fecha). El backend garantiza la
/// unicidad del par; repetir el mismo valor no altera nada.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleAsistencia {
    pub aprendiz_id: i64,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha: NaiveDateTime,
    pub presente: bool,
}

impl ToggleAsistencia {
    pub fn nuevo(aprendiz_id: i64, dia: NaiveDate, presente: bool) -> Self {
        Self {
            aprendiz_id,
            fecha: dia.and_time(NaiveTime::MIN),
            presente,
        }
    }

    pub fn dia(&self) -> NaiveDate {
        self.fecha.date()
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportResumen {
    pub ok: bool,
    pub creados: i64,
}

#[derive(Debug, Clone, Default)]
pub struct FiltroAsistencia {
    pub profesora_id: Option<i64>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
}

impl FiltroAsistencia {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.profesora_id {
            params.push(("profesora_id", id.to_string()));
        }
        if let Some(desde) = self.fecha_inicio {
            params.push(("fecha_inicio", desde.format("%Y-%m-%d").to_string()));
        }
        if let Some(hasta) = self.fecha_fin {
            params.push(("fecha_fin", hasta.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct FiltroClases {
    pub fecha_inicio: Option<NaiveDateTime>,
    pub fecha_fin: Option<NaiveDateTime>,
}

impl FiltroClases {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(desde) = self.fecha_inicio {
            params.push(("fecha_inicio", desde.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if let Some(hasta) = self.fecha_fin {
            params.push(("fecha_fin", hasta.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        params
    }
}
