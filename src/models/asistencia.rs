use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Profesora;
use crate::fechas;

/// Aprendiz cargado por la importación de listas (Excel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aprendiz {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub documento: Option<String>,
}

/// Registro de asistencia de un día. El backend a veces devuelve `fecha`
/// como datetime; aquí siempre se reduce al día local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asistencia {
    pub id: i64,
    #[serde(with = "fechas::serde_dia")]
    pub fecha: NaiveDate,
    pub presente: bool,
    pub profesora: Profesora,
    #[serde(default)]
    pub aprendiz: Option<Aprendiz>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Fila del resumen `/asistencia/listas/`: total de presentes por aprendiz.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumenAprendiz {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub documento: Option<String>,
    pub total: i64,
}

/// Detalle `/asistencia/detalle/{id}`: fechas registradas y su estado.
#[derive(Debug, Clone, Deserialize)]
pub struct DetalleAprendiz {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub documento: Option<String>,
    pub fechas: Vec<NaiveDate>,
    pub asistencias: HashMap<String, bool>,
}
