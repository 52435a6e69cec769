//! Núcleo cliente de la agenda del colegio y la TecnoAcademia: calendario de
//! clases, registro de asistencia y resumen diario contra el backend REST.

pub mod api;
pub mod calendario;
pub mod config;
pub mod error;
pub mod fechas;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;
