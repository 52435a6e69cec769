//! Cliente del backend REST.
//!
//! El trait [`ApiClient`] cubre todos los endpoints que consume la
//! aplicación; [`HttpApiClient`] es la implementación real sobre `reqwest`.
//! Las credenciales llegan por una [`Session`] compartida: cada petición lee
//! el token vigente y un 401 expira la sesión una sola vez.

pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Asistencia, Clase, DetalleAprendiz, Profesora, ResumenAprendiz};
use crate::session::Session;

#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn login(&self, solicitud: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError>;
    async fn registrar(&self, solicitud: &dto::RegistroProfesora) -> Result<Profesora, AppError>;
    async fn usuario_actual(&self) -> Result<Profesora, AppError>;
    async fn profesoras(&self) -> Result<Vec<Profesora>, AppError>;

    async fn asistencias(
        &self,
        filtro: &dto::FiltroAsistencia,
    ) -> Result<Vec<Asistencia>, AppError>;
    async fn crear_asistencia(
        &self,
        nueva: &dto::AsistenciaCreate,
    ) -> Result<Asistencia, AppError>;
    async fn toggle_asistencia(&self, cambio: &dto::ToggleAsistencia) -> Result<(), AppError>;
    async fn resumen_aprendices(&self) -> Result<Vec<ResumenAprendiz>, AppError>;
    async fn detalle_aprendiz(&self, aprendiz_id: i64) -> Result<DetalleAprendiz, AppError>;
    async fn importar_excel(
        &self,
        archivo: Vec<u8>,
        nombre_archivo: &str,
        nombre_lista: Option<&str>,
    ) -> Result<dto::ImportResumen, AppError>;
    async fn exportar_csv(&self) -> Result<String, AppError>;

    async fn clases(&self, filtro: &dto::FiltroClases) -> Result<Vec<Clase>, AppError>;
    async fn clases_calendario(&self, mes: u32, anio: i32) -> Result<Vec<Clase>, AppError>;
    async fn crear_clase(&self, nueva: &dto::ClaseCreate) -> Result<Clase, AppError>;
}

pub struct HttpApiClient {
    client: Client,
    config: Config,
    session: Session,
}

impl HttpApiClient {
    pub fn new(config: Config, session: Session) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("no se pudo construir el cliente http: {e}")))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, ruta: &str) -> String {
        format!("{}{}", self.config.base_url, ruta)
    }

    fn autorizado(&self, peticion: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => peticion.header("Authorization", format!("Bearer {token}")),
            None => peticion,
        }
    }

    async fn enviar(&self, peticion: RequestBuilder) -> Result<Response, AppError> {
        let respuesta = peticion
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = respuesta.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("el backend rechazó el token; cerrando sesión");
            self.session.expirar();
            return Err(AppError::AuthExpired);
        }
        if !status.is_success() {
            let cuerpo = respuesta.text().await.unwrap_or_default();
            return Err(AppError::Http {
                status: status.as_u16(),
                message: detalle_backend(&cuerpo),
            });
        }
        Ok(respuesta)
    }

    async fn json<T: DeserializeOwned>(&self, peticion: RequestBuilder) -> Result<T, AppError> {
        let respuesta = self.enviar(peticion).await?;
        let cuerpo = respuesta
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        serde_json::from_str(&cuerpo).map_err(|e| AppError::Decode(e.to_string()))
    }
}

/// FastAPI empaqueta sus errores como `{"detail": "..."}`.
fn detalle_backend(cuerpo: &str) -> String {
    serde_json::from_str::<serde_json::Value>(cuerpo)
        .ok()
        .and_then(|valor| {
            valor
                .get("detail")
                .and_then(|detalle| detalle.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| cuerpo.to_string())
}

#[async_trait]
impl ApiClient for HttpApiClient {
    /// El login no pasa por el manejo global de 401: unas credenciales malas
    /// no deben expirar una sesión que todavía no existe.
    async fn login(&self, solicitud: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError> {
        let respuesta = self
            .client
            .post(self.url("/login"))
            .json(solicitud)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = respuesta.status();
        let cuerpo = respuesta.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::Http {
                status: status.as_u16(),
                message: detalle_backend(&cuerpo),
            });
        }

        let datos: dto::LoginResponse =
            serde_json::from_str(&cuerpo).map_err(|e| AppError::Decode(e.to_string()))?;
        self.session.iniciar(datos.access_token.clone());
        Ok(datos)
    }

    async fn registrar(&self, solicitud: &dto::RegistroProfesora) -> Result<Profesora, AppError> {
        self.json(self.client.post(self.url("/register")).json(solicitud))
            .await
    }

    async fn usuario_actual(&self) -> Result<Profesora, AppError> {
        self.json(self.autorizado(self.client.get(self.url("/me"))))
            .await
    }

    async fn profesoras(&self) -> Result<Vec<Profesora>, AppError> {
        self.json(self.autorizado(self.client.get(self.url("/profesoras"))))
            .await
    }

    async fn asistencias(
        &self,
        filtro: &dto::FiltroAsistencia,
    ) -> Result<Vec<Asistencia>, AppError> {
        let peticion = self
            .client
            .get(self.url("/asistencia/"))
            .query(&filtro.query());
        self.json(self.autorizado(peticion)).await
    }

    async fn crear_asistencia(
        &self,
        nueva: &dto::AsistenciaCreate,
    ) -> Result<Asistencia, AppError> {
        let peticion = self.client.post(self.url("/asistencia/")).json(nueva);
        self.json(self.autorizado(peticion)).await
    }

    async fn toggle_asistencia(&self, cambio: &dto::ToggleAsistencia) -> Result<(), AppError> {
        let peticion = self.client.patch(self.url("/asistencia/toggle/")).json(cambio);
        self.enviar(self.autorizado(peticion)).await?;
        Ok(())
    }

    async fn resumen_aprendices(&self) -> Result<Vec<ResumenAprendiz>, AppError> {
        self.json(self.autorizado(self.client.get(self.url("/asistencia/listas/"))))
            .await
    }

    async fn detalle_aprendiz(&self, aprendiz_id: i64) -> Result<DetalleAprendiz, AppError> {
        let ruta = format!("/asistencia/detalle/{aprendiz_id}");
        self.json(self.autorizado(self.client.get(self.url(&ruta))))
            .await
    }

    /// El archivo viaja como bytes opacos; el backend es quien entiende Excel.
    async fn importar_excel(
        &self,
        archivo: Vec<u8>,
        nombre_archivo: &str,
        nombre_lista: Option<&str>,
    ) -> Result<dto::ImportResumen, AppError> {
        let mut formulario = multipart::Form::new().part(
            "archivo",
            multipart::Part::bytes(archivo).file_name(nombre_archivo.to_string()),
        );
        if let Some(lista) = nombre_lista {
            formulario = formulario.text("nombre_lista", lista.to_string());
        }
        let peticion = self
            .client
            .post(self.url("/asistencia/importar/"))
            .multipart(formulario);
        self.json(self.autorizado(peticion)).await
    }

    async fn exportar_csv(&self) -> Result<String, AppError> {
        let respuesta = self
            .enviar(self.autorizado(self.client.get(self.url("/asistencia/exportar/"))))
            .await?;
        respuesta
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))
    }

    async fn clases(&self, filtro: &dto::FiltroClases) -> Result<Vec<Clase>, AppError> {
        let peticion = self.client.get(self.url("/clases")).query(&filtro.query());
        self.json(self.autorizado(peticion)).await
    }

    async fn clases_calendario(&self, mes: u32, anio: i32) -> Result<Vec<Clase>, AppError> {
        let peticion = self
            .client
            .get(self.url("/clases/calendario"))
            .query(&[("mes", mes.to_string()), ("año", anio.to_string())]);
        self.json(self.autorizado(peticion)).await
    }

    async fn crear_clase(&self, nueva: &dto::ClaseCreate) -> Result<Clase, AppError> {
        let peticion = self.client.post(self.url("/clases")).json(nueva);
        self.json(self.autorizado(peticion)).await
    }
}

/// Cliente sin backend: listados vacíos, escrituras que no hacen nada y
/// error en todo lo que exige una respuesta real. Útil como doble en pruebas.
pub struct NoopApiClient;

impl NoopApiClient {
    fn deshabilitado() -> AppError {
        AppError::Config("cliente API deshabilitado".to_string())
    }
}

#[async_trait]
impl ApiClient for NoopApiClient {
    async fn login(&self, _solicitud: &dto::LoginRequest) -> Result<dto::LoginResponse, AppError> {
        Err(Self::deshabilitado())
    }

    async fn registrar(&self, _solicitud: &dto::RegistroProfesora) -> Result<Profesora, AppError> {
        Err(Self::deshabilitado())
    }

    async fn usuario_actual(&self) -> Result<Profesora, AppError> {
        Err(Self::deshabilitado())
    }

    async fn profesoras(&self) -> Result<Vec<Profesora>, AppError> {
        Ok(Vec::new())
    }

    async fn asistencias(
        &self,
        _filtro: &dto::FiltroAsistencia,
    ) -> Result<Vec<Asistencia>, AppError> {
        Ok(Vec::new())
    }

    async fn crear_asistencia(
        &self,
        _nueva: &dto::AsistenciaCreate,
    ) -> Result<Asistencia, AppError> {
        Err(Self::deshabilitado())
    }

    async fn toggle_asistencia(&self, _cambio: &dto::ToggleAsistencia) -> Result<(), AppError> {
        Ok(())
    }

    async fn resumen_aprendices(&self) -> Result<Vec<ResumenAprendiz>, AppError> {
        Ok(Vec::new())
    }

    async fn detalle_aprendiz(&self, _aprendiz_id: i64) -> Result<DetalleAprendiz, AppError> {
        Err(Self::deshabilitado())
    }

    async fn importar_excel(
        &self,
        _archivo: Vec<u8>,
        _nombre_archivo: &str,
        _nombre_lista: Option<&str>,
    ) -> Result<dto::ImportResumen, AppError> {
        Err(Self::deshabilitado())
    }

    async fn exportar_csv(&self) -> Result<String, AppError> {
        Ok(String::new())
    }

    async fn clases(&self, _filtro: &dto::FiltroClases) -> Result<Vec<Clase>, AppError> {
        Ok(Vec::new())
    }

    async fn clases_calendario(&self, _mes: u32, _anio: i32) -> Result<Vec<Clase>, AppError> {
        Ok(Vec::new())
    }

    async fn crear_clase(&self, _nueva: &dto::ClaseCreate) -> Result<Clase, AppError> {
        Err(Self::deshabilitado())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrae_el_detalle_de_un_error_fastapi() {
        assert_eq!(
            detalle_backend(r#"{"detail": "Aprendiz no encontrado"}"#),
            "Aprendiz no encontrado"
        );
        assert_eq!(detalle_backend("puerta cerrada"), "puerta cerrada");
    }
}
