//! Formulario de programación de clases.
//!
//! Máquina de estados `Borrador → Validado → Enviado | Rechazado`. Un envío
//! fallido deja todos los campos intactos para reintentar; cualquier edición
//! regresa el formulario a `Borrador`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::info;

use crate::api::{ApiClient, dto::ClaseCreate};
use crate::error::{AppError, ValidationError};
use crate::models::{Clase, Ubicacion};

/// Duración por defecto de una clase, en horas.
pub const HORAS_PREDETERMINADAS: i64 = 2;

const HORA_INICIO_CELDA: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoForm {
    Borrador,
    Validado,
    Enviado,
    Rechazado,
}

#[derive(Debug, Clone)]
pub struct ClaseForm {
    pub profesora_id: Option<i64>,
    pub titulo: String,
    pub fecha_inicio: NaiveDateTime,
    pub fecha_fin: NaiveDateTime,
    pub ubicacion: Ubicacion,
    pub descripcion: String,
    fin_bloqueado: bool,
    estado: EstadoForm,
    error: Option<String>,
}

impl ClaseForm {
    /// Abierto desde una celda del calendario: el día elegido a las 08:00.
    pub fn desde_dia(dia: NaiveDate) -> Self {
        let inicio = dia.and_hms_opt(HORA_INICIO_CELDA, 0, 0).unwrap_or_else(|| {
            dia.and_time(chrono::NaiveTime::MIN)
        });
        Self::con_inicio(inicio)
    }

    /// Abierto desde "Nueva Clase": la hora actual redondeada hacia abajo.
    pub fn nueva(ahora: NaiveDateTime) -> Self {
        Self::con_inicio(crate::fechas::hora_en_punto(ahora))
    }

    fn con_inicio(inicio: NaiveDateTime) -> Self {
        Self {
            profesora_id: None,
            titulo: String::new(),
            fecha_inicio: inicio,
            fecha_fin: inicio + Duration::hours(HORAS_PREDETERMINADAS),
            ubicacion: Ubicacion::Colegio,
            descripcion: String::new(),
            fin_bloqueado: false,
            estado: EstadoForm::Borrador,
            error: None,
        }
    }

    pub fn estado(&self) -> EstadoForm {
        self.estado
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` una vez que el usuario editó el fin a mano en esta sesión.
    pub fn fin_bloqueado(&self) -> bool {
        self.fin_bloqueado
    }

    /// Mover el inicio arrastra el fin a `inicio + 2 h`, salvo que el
    /// usuario ya haya fijado un fin propio.
    pub fn set_inicio(&mut self, inicio: NaiveDateTime) {
        self.fecha_inicio = inicio;
        if !self.fin_bloqueado {
            self.fecha_fin = inicio + Duration::hours(HORAS_PREDETERMINADAS);
        }
        self.tocar();
    }

    pub fn set_fin(&mut self, fin: NaiveDateTime) {
        self.fecha_fin = fin;
        self.fin_bloqueado = true;
        self.tocar();
    }

    pub fn set_profesora(&mut self, profesora_id: i64) {
        self.profesora_id = Some(profesora_id);
        self.tocar();
    }

    pub fn set_titulo(&mut self, titulo: impl Into<String>) {
        self.titulo = titulo.into();
        self.tocar();
    }

    pub fn set_ubicacion(&mut self, ubicacion: Ubicacion) {
        self.ubicacion = ubicacion;
        self.tocar();
    }

    pub fn set_descripcion(&mut self, descripcion: impl Into<String>) {
        self.descripcion = descripcion.into();
        self.tocar();
    }

    fn tocar(&mut self) {
        self.estado = EstadoForm::Borrador;
        self.error = None;
    }

    /// Reglas: campos obligatorios completos, `fin > inicio` y el día de
    /// inicio no anterior a `hoy` (hoy mismo está permitido, a cualquier hora).
    pub fn validar(&mut self, hoy: NaiveDate) -> Result<(), ValidationError> {
        let resultado = self.revisar(hoy);
        match resultado {
            Ok(()) => {
                self.estado = EstadoForm::Validado;
                self.error = None;
            }
            Err(falla) => {
                self.estado = EstadoForm::Borrador;
                self.error = Some(falla.to_string());
            }
        }
        resultado
    }

    fn revisar(&self, hoy: NaiveDate) -> Result<(), ValidationError> {
        if self.profesora_id.is_none() || self.titulo.trim().is_empty() {
            return Err(ValidationError::CamposIncompletos);
        }
        if self.fecha_fin <= self.fecha_inicio {
            return Err(ValidationError::InvalidRange);
        }
        if self.fecha_inicio.date() < hoy {
            return Err(ValidationError::PastDate);
        }
        Ok(())
    }

    fn payload(&self) -> Result<ClaseCreate, ValidationError> {
        let profesora_id = self.profesora_id.ok_or(ValidationError::CamposIncompletos)?;
        let descripcion = match self.descripcion.trim() {
            "" => None,
            texto => Some(texto.to_string()),
        };
        Ok(ClaseCreate {
            profesora_id,
            titulo: self.titulo.clone(),
            fecha_inicio: self.fecha_inicio,
            fecha_fin: self.fecha_fin,
            ubicacion: self.ubicacion,
            descripcion,
        })
    }

    /// Solo un formulario en `Validado` puede enviarse. Si el backend falla
    /// el formulario pasa a `Rechazado` sin perder lo escrito.
    pub async fn enviar(&mut self, api: &dyn ApiClient) -> Result<Clase, AppError> {
        if self.estado != EstadoForm::Validado {
            return Err(ValidationError::SinValidar.into());
        }
        let payload = self.payload()?;
        match api.crear_clase(&payload).await {
            Ok(clase) => {
                info!(clase = clase.id, titulo = %clase.titulo, "clase programada");
                self.estado = EstadoForm::Enviado;
                Ok(clase)
            }
            Err(falla) => {
                self.estado = EstadoForm::Rechazado;
                self.error = Some(falla.to_string());
                Err(falla)
            }
        }
    }
}
