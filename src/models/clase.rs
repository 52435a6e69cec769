use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Profesora;
use crate::fechas;

/// Las dos sedes posibles de una clase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ubicacion {
    Colegio,
    #[serde(rename = "Centro TecnoAcademia")]
    CentroTecnoAcademia,
}

impl fmt::Display for Ubicacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ubicacion::Colegio => f.write_str("Colegio"),
            Ubicacion::CentroTecnoAcademia => f.write_str("Centro TecnoAcademia"),
        }
    }
}

/// Clase programada, tal como la devuelve el backend.
///
/// Invariante `fecha_fin > fecha_inicio`: se exige al crear (formulario) y se
/// asume en lectura. Los timestamps ya vienen normalizados a hora de Bogotá
/// por los deserializadores de [`crate::fechas`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clase {
    pub id: i64,
    #[serde(default)]
    pub profesora_id: Option<i64>,
    pub titulo: String,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha_inicio: NaiveDateTime,
    #[serde(with = "fechas::serde_fecha")]
    pub fecha_fin: NaiveDateTime,
    pub ubicacion: Ubicacion,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub profesora: Profesora,
}

impl Clase {
    /// Día calendario local en el que inicia la clase.
    pub fn dia_inicio(&self) -> NaiveDate {
        self.fecha_inicio.date()
    }

    pub fn duracion(&self) -> String {
        fechas::calcular_duracion(self.fecha_inicio, self.fecha_fin)
    }

    pub fn horario(&self) -> String {
        fechas::formatear_rango(self.fecha_inicio, self.fecha_fin)
    }

    /// Una clase ya terminada se muestra atenuada en los listados.
    pub fn finalizada(&self, ahora: NaiveDateTime) -> bool {
        self.fecha_fin < ahora
    }
}
