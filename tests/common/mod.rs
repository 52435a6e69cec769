//! Doble de prueba del backend: implementa `ApiClient` en memoria con
//! fallas configurables por consulta.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use tecnoagenda::api::{ApiClient, dto};
use tecnoagenda::error::AppError;
use tecnoagenda::fechas;
use tecnoagenda::models::{
    Asistencia, Clase, DetalleAprendiz, Profesora, ResumenAprendiz, Ubicacion,
};

pub fn profesora(id: i64, nombre: &str) -> Profesora {
    Profesora {
        id,
        nombre: nombre.to_string(),
        email: None,
        especialidad: "Robótica".to_string(),
    }
}

pub fn clase(id: i64, inicio: &str, fin: &str) -> Clase {
    Clase {
        id,
        profesora_id: Some(1),
        titulo: format!("Clase {id}"),
        fecha_inicio: fechas::parse_fecha_backend(inicio).expect("fecha de prueba válida"),
        fecha_fin: fechas::parse_fecha_backend(fin).expect("fecha de prueba válida"),
        ubicacion: Ubicacion::Colegio,
        descripcion: None,
        profesora: profesora(1, "Ana"),
    }
}

pub fn asistencia(id: i64, dia: &str, presente: bool) -> Asistencia {
    Asistencia {
        id,
        fecha: NaiveDate::parse_from_str(dia, "%Y-%m-%d").expect("día de prueba válido"),
        presente,
        profesora: profesora(1, "Ana"),
        aprendiz: None,
        observaciones: None,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub profesoras: Mutex<Vec<Profesora>>,
    pub clases: Mutex<Vec<Clase>>,
    pub asistencias: Mutex<Vec<Asistencia>>,
    /// Estado del par (aprendiz, día) tras los toggles recibidos.
    pub marcas: Mutex<HashMap<(i64, NaiveDate), bool>>,
    pub meses_pedidos: Mutex<Vec<(u32, i32)>>,

    pub fallo_profesoras: AtomicBool,
    pub fallo_asistencias: AtomicBool,
    pub fallo_clases: AtomicBool,
    pub fallo_crear_clase: AtomicBool,

    siguiente_id: AtomicI64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn caido(&self, bandera: &AtomicBool) -> bool {
        bandera.load(Ordering::SeqCst)
    }

    fn otro_id(&self) -> i64 {
        self.siguiente_id.fetch_add(1, Ordering::SeqCst) + 1000
    }

    fn falla(consulta: &str) -> AppError {
        AppError::Http {
            status: 500,
            message: format!("error interno en {consulta}"),
        }
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn login(&self, _solicitud: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError> {
        Ok(dto::LoginResponse {
            access_token: "token-de-prueba".to_string(),
            token_type: "bearer".to_string(),
            profesora: profesora(1, "Ana"),
        })
    }

    async fn registrar(&self, solicitud: &dto::RegistroProfesora) -> Result<Profesora, AppError> {
        Ok(profesora(self.otro_id(), &solicitud.nombre))
    }

    async fn usuario_actual(&self) -> Result<Profesora, AppError> {
        Ok(profesora(1, "Ana"))
    }

    async fn profesoras(&self) -> Result<Vec<Profesora>, AppError> {
        if self.caido(&self.fallo_profesoras) {
            return Err(Self::falla("profesoras"));
        }
        Ok(self.profesoras.lock().unwrap().clone())
    }

    async fn asistencias(
        &self,
        _filtro: &dto::FiltroAsistencia,
    ) -> Result<Vec<Asistencia>, AppError> {
        if self.caido(&self.fallo_asistencias) {
            return Err(Self::falla("asistencias"));
        }
        Ok(self.asistencias.lock().unwrap().clone())
    }

    async fn crear_asistencia(
        &self,
        nueva: &dto::AsistenciaCreate,
    ) -> Result<Asistencia, AppError> {
        let registro = Asistencia {
            id: self.otro_id(),
            fecha: nueva.fecha.date(),
            presente: nueva.presente,
            profesora: profesora(nueva.profesora_id, "Ana"),
            aprendiz: None,
            observaciones: nueva.observaciones.clone(),
        };
        self.asistencias.lock().unwrap().push(registro.clone());
        Ok(registro)
    }

    async fn toggle_asistencia(&self, cambio: &dto::ToggleAsistencia) -> Result<(), AppError> {
        self.marcas
            .lock()
            .unwrap()
            .insert((cambio.aprendiz_id, cambio.dia()), cambio.presente);
        Ok(())
    }

    async fn resumen_aprendices(&self) -> Result<Vec<ResumenAprendiz>, AppError> {
        Ok(Vec::new())
    }

    async fn detalle_aprendiz(&self, aprendiz_id: i64) -> Result<DetalleAprendiz, AppError> {
        Ok(DetalleAprendiz {
            id: aprendiz_id,
            nombre: "Luis".to_string(),
            documento: None,
            fechas: Vec::new(),
            asistencias: HashMap::new(),
        })
    }

    async fn importar_excel(
        &self,
        _archivo: Vec<u8>,
        _nombre_archivo: &str,
        _nombre_lista: Option<&str>,
    ) -> Result<dto::ImportResumen, AppError> {
        Ok(dto::ImportResumen {
            ok: true,
            creados: 0,
        })
    }

    async fn exportar_csv(&self) -> Result<String, AppError> {
        Ok("NOMBRES,DOCUMENTO\n".to_string())
    }

    async fn clases(&self, _filtro: &dto::FiltroClases) -> Result<Vec<Clase>, AppError> {
        if self.caido(&self.fallo_clases) {
            return Err(Self::falla("clases"));
        }
        Ok(self.clases.lock().unwrap().clone())
    }

    async fn clases_calendario(&self, mes: u32, anio: i32) -> Result<Vec<Clase>, AppError> {
        self.meses_pedidos.lock().unwrap().push((mes, anio));
        if self.caido(&self.fallo_clases) {
            return Err(Self::falla("clases"));
        }
        let del_mes = self
            .clases
            .lock()
            .unwrap()
            .iter()
            .filter(|clase| {
                clase.fecha_inicio.month() == mes && clase.fecha_inicio.year() == anio
            })
            .cloned()
            .collect();
        Ok(del_mes)
    }

    async fn crear_clase(&self, nueva: &dto::ClaseCreate) -> Result<Clase, AppError> {
        if self.caido(&self.fallo_crear_clase) {
            return Err(Self::falla("crear clase"));
        }
        let creada = Clase {
            id: self.otro_id(),
            profesora_id: Some(nueva.profesora_id),
            titulo: nueva.titulo.clone(),
            fecha_inicio: nueva.fecha_inicio,
            fecha_fin: nueva.fecha_fin,
            ubicacion: nueva.ubicacion,
            descripcion: nueva.descripcion.clone(),
            profesora: profesora(nueva.profesora_id, "Ana"),
        };
        self.clases.lock().unwrap().push(creada.clone());
        Ok(creada)
    }
}
