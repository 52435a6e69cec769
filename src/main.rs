use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tecnoagenda::api::{ApiClient, HttpApiClient, dto::LoginRequest};
use tecnoagenda::config::Config;
use tecnoagenda::fechas;
use tecnoagenda::services::{CalendarioView, DashboardService};
use tecnoagenda::session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tecnoagenda=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new_from_env()?;
    let session = Session::new(std::env::var("API_TOKEN").ok());
    let api: Arc<HttpApiClient> = Arc::new(HttpApiClient::new(config, session.clone())?);

    if !session.activa() {
        let email = std::env::var("API_EMAIL")
            .map_err(|_| "defina API_TOKEN o el par API_EMAIL/API_PASSWORD")?;
        let password = std::env::var("API_PASSWORD")
            .map_err(|_| "defina API_TOKEN o el par API_EMAIL/API_PASSWORD")?;
        let datos = api.login(&LoginRequest { email, password }).await?;
        info!(profesora = %datos.profesora.nombre, "sesión iniciada");
    }

    // Único punto donde se lee el reloj real; todo lo demás recibe la fecha.
    let ahora = fechas::ahora_bogota();
    let hoy = ahora.date();
    info!(hoy = %fechas::formatear_fecha(hoy), "cargando resumen del día");

    let dashboard = DashboardService::new(api.clone());
    let resumen = dashboard.cargar(hoy).await;

    match resumen.total_profesoras {
        Some(total) => info!(total_profesoras = total, "profesoras registradas"),
        None => warn!("total de profesoras no disponible"),
    }
    info!(
        asistencias_hoy = ?resumen.asistencias_hoy,
        clases_hoy = ?resumen.clases_hoy,
        "conteos de hoy"
    );
    for clase in &resumen.proximas_clases {
        info!(
            titulo = %clase.titulo,
            horario = %clase.horario(),
            ubicacion = %clase.ubicacion,
            "próxima clase"
        );
    }
    if let Some(mensaje) = resumen.mensaje_error() {
        warn!("algunas consultas fallaron: {mensaje}");
    }

    let mut calendario = CalendarioView::new(api, hoy);
    calendario.cargar().await;
    if let Some(falla) = calendario.error() {
        warn!("calendario sin datos: {falla}");
    }
    info!(
        mes = %calendario.titulo(),
        clases = calendario.clases().len(),
        "calendario del mes cargado"
    );

    Ok(())
}
