//! Flujos de asistencia: listado, alta, toggle, importación y exportación.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::api::{
    ApiClient,
    dto::{AsistenciaCreate, FiltroAsistencia, ImportResumen, ToggleAsistencia},
};
use crate::error::AppError;
use crate::models::{Asistencia, DetalleAprendiz, ResumenAprendiz};

pub struct AsistenciaService {
    api: Arc<dyn ApiClient>,
}

impl AsistenciaService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    pub async fn listar(&self, filtro: &FiltroAsistencia) -> Result<Vec<Asistencia>, AppError> {
        self.api.asistencias(filtro).await
    }

    /// Alta directa: siempre agrega un registro nuevo. La unicidad del par
    /// (sujeto, fecha) es responsabilidad del backend, no de este cliente.
    pub async fn crear(&self, nueva: &AsistenciaCreate) -> Result<Asistencia, AppError> {
        let registro = self.api.crear_asistencia(nueva).await?;
        info!(asistencia = registro.id, "asistencia registrada");
        Ok(registro)
    }

    /// Cambio puntual e idempotente del par (aprendiz, día): repetir el
    /// mismo valor no altera nada, el valor contrario voltea el registro.
    pub async fn marcar(
        &self,
        aprendiz_id: i64,
        dia: NaiveDate,
        presente: bool,
    ) -> Result<(), AppError> {
        let cambio = ToggleAsistencia::nuevo(aprendiz_id, dia, presente);
        self.api.toggle_asistencia(&cambio).await
    }

    pub async fn resumen(&self) -> Result<Vec<ResumenAprendiz>, AppError> {
        self.api.resumen_aprendices().await
    }

    pub async fn detalle(&self, aprendiz_id: i64) -> Result<DetalleAprendiz, AppError> {
        self.api.detalle_aprendiz(aprendiz_id).await
    }

    /// Sube el Excel tal cual; el backend hace el parseo y responde cuántas
    /// filas creó.
    pub async fn importar(
        &self,
        archivo: Vec<u8>,
        nombre_archivo: &str,
        nombre_lista: Option<&str>,
    ) -> Result<ImportResumen, AppError> {
        let resumen = self
            .api
            .importar_excel(archivo, nombre_archivo, nombre_lista)
            .await?;
        info!(creados = resumen.creados, "lista importada");
        Ok(resumen)
    }

    /// CSV plano listo para descargar.
    pub async fn exportar(&self) -> Result<String, AppError> {
        self.api.exportar_csv().await
    }
}
