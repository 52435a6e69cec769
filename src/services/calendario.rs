//! Vista mensual del calendario de clases.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::warn;

use crate::api::ApiClient;
use crate::calendario::{self, DiaCalendario, VistaDia};
use crate::fechas;
use crate::forms::ClaseForm;
use crate::models::Clase;

pub struct CalendarioView {
    api: Arc<dyn ApiClient>,
    /// Siempre el día 1 del mes mostrado.
    referencia: NaiveDate,
    clases: Vec<Clase>,
    cargando: bool,
    error: Option<String>,
}

/// Una celda de la grilla junto con las clases visibles de ese día.
pub struct CeldaCalendario<'a> {
    pub dia: DiaCalendario,
    pub vista: VistaDia<'a>,
}

impl CalendarioView {
    pub fn new(api: Arc<dyn ApiClient>, referencia: NaiveDate) -> Self {
        let referencia =
            NaiveDate::from_ymd_opt(referencia.year(), referencia.month(), 1).unwrap_or(referencia);
        Self {
            api,
            referencia,
            clases: Vec::new(),
            cargando: false,
            error: None,
        }
    }

    pub fn referencia(&self) -> NaiveDate {
        self.referencia
    }

    /// "Enero 2025", para el encabezado.
    pub fn titulo(&self) -> String {
        format!(
            "{} {}",
            fechas::nombre_mes(self.referencia.month()),
            self.referencia.year()
        )
    }

    pub fn cargando(&self) -> bool {
        self.cargando
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clases del mes mostrado, ordenadas por inicio.
    pub fn clases(&self) -> &[Clase] {
        &self.clases
    }

    /// Pide al backend las clases del mes mostrado. Si la consulta falla el
    /// mes queda vacío y el error disponible para el banner; una respuesta
    /// tardía de un mes anterior simplemente queda pisada por la última.
    pub async fn cargar(&mut self) {
        self.cargando = true;
        self.error = None;
        let resultado = self
            .api
            .clases_calendario(self.referencia.month(), self.referencia.year())
            .await;
        self.cargando = false;

        match resultado {
            Ok(mut clases) => {
                clases.sort_by_key(|clase| clase.fecha_inicio);
                self.clases = clases;
            }
            Err(falla) => {
                warn!("no se pudieron cargar las clases del mes: {falla}");
                self.clases.clear();
                self.error = Some(falla.to_string());
            }
        }
    }

    pub async fn mes_anterior(&mut self) {
        self.referencia = calendario::mes_anterior(self.referencia);
        self.cargar().await;
    }

    pub async fn mes_siguiente(&mut self) {
        self.referencia = calendario::mes_siguiente(self.referencia);
        self.cargar().await;
    }

    /// La grilla de 42 celdas con las clases de cada día ya agrupadas.
    pub fn grilla(&self, hoy: NaiveDate) -> Vec<CeldaCalendario<'_>> {
        calendario::grilla_mes(self.referencia, hoy)
            .into_iter()
            .map(|dia| CeldaCalendario {
                vista: calendario::vista_dia(&self.clases, dia.fecha),
                dia,
            })
            .collect()
    }

    /// Clic sobre una celda: solo los días del mes mostrado abren el
    /// formulario, prellenado con ese día.
    pub fn clic_dia(&self, dia: &DiaCalendario) -> Option<ClaseForm> {
        dia.del_mes.then(|| ClaseForm::desde_dia(dia.fecha))
    }
}
