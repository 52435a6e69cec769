//! Resumen del día para la pantalla principal.
//!
//! Las tres consultas (profesoras, asistencias, clases próximas) son
//! independientes: la caída de una no impide renderizar las otras dos. Los
//! errores se acumulan en un único mensaje visible y el reintento manual
//! vuelve a lanzar todo.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::api::{
    ApiClient,
    dto::{FiltroAsistencia, FiltroClases},
};
use crate::models::{Asistencia, Clase};

/// Cuántos elementos muestran las listas de "próximas" y "recientes".
pub const MAX_LISTADO: usize = 5;

/// Ventana hacia adelante para las clases próximas.
pub const DIAS_PROXIMOS: i64 = 7;

pub struct DashboardService {
    api: Arc<dyn ApiClient>,
}

#[derive(Debug, Default)]
pub struct ResumenDashboard {
    /// `None` cuando la consulta de profesoras falló (se muestra "no disponible").
    pub total_profesoras: Option<usize>,
    pub asistencias_hoy: Option<usize>,
    pub clases_hoy: Option<usize>,
    pub proximas_clases: Vec<Clase>,
    pub asistencias_recientes: Vec<Asistencia>,
    pub errores: Vec<String>,
}

impl ResumenDashboard {
    pub fn completo(&self) -> bool {
        self.errores.is_empty()
    }

    /// Mensaje combinado para el banner de error, si algo falló.
    pub fn mensaje_error(&self) -> Option<String> {
        if self.errores.is_empty() {
            None
        } else {
            Some(self.errores.join("; "))
        }
    }
}

impl DashboardService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    pub async fn cargar(&self, hoy: NaiveDate) -> ResumenDashboard {
        let filtro_clases = FiltroClases {
            fecha_inicio: Some(hoy.and_time(NaiveTime::MIN)),
            fecha_fin: Some((hoy + Duration::days(DIAS_PROXIMOS)).and_time(NaiveTime::MIN)),
        };

        let filtro_asistencia = FiltroAsistencia::default();
        let (profesoras, asistencias, clases) = tokio::join!(
            self.api.profesoras(),
            self.api.asistencias(&filtro_asistencia),
            self.api.clases(&filtro_clases),
        );

        let mut resumen = ResumenDashboard::default();

        match profesoras {
            Ok(lista) => resumen.total_profesoras = Some(lista.len()),
            Err(falla) => {
                warn!("no se pudieron cargar las profesoras: {falla}");
                resumen.errores.push(format!("profesoras: {falla}"));
            }
        }

        match asistencias {
            Ok(lista) => {
                resumen.asistencias_hoy =
                    Some(lista.iter().filter(|registro| registro.fecha == hoy).count());
                resumen.asistencias_recientes = lista.into_iter().take(MAX_LISTADO).collect();
            }
            Err(falla) => {
                warn!("no se pudieron cargar las asistencias: {falla}");
                resumen.errores.push(format!("asistencias: {falla}"));
            }
        }

        match clases {
            Ok(mut lista) => {
                resumen.clases_hoy = Some(
                    lista
                        .iter()
                        .filter(|clase| clase.dia_inicio() == hoy)
                        .count(),
                );
                lista.sort_by_key(|clase| clase.fecha_inicio);
                lista.truncate(MAX_LISTADO);
                resumen.proximas_clases = lista;
            }
            Err(falla) => {
                warn!("no se pudieron cargar las clases: {falla}");
                resumen.errores.push(format!("clases: {falla}"));
            }
        }

        info!(
            profesoras = ?resumen.total_profesoras,
            asistencias_hoy = ?resumen.asistencias_hoy,
            clases_hoy = ?resumen.clases_hoy,
            fallas = resumen.errores.len(),
            "dashboard cargado"
        );
        resumen
    }

    /// El reintento manual vuelve a emitir las tres consultas completas.
    pub async fn recargar(&self, hoy: NaiveDate) -> ResumenDashboard {
        self.cargar(hoy).await
    }
}
