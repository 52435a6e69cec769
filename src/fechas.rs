//! Utilidades de fecha y hora.
//!
//! Toda la aplicación trabaja en hora local de Colombia (UTC-05:00, sin
//! horario de verano). Las funciones que comparan contra "hoy" o "ahora"
//! reciben ese instante como parámetro; el reloj real solo se lee en
//! [`ahora_bogota`]/[`hoy_bogota`], pensadas para el punto de entrada.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

const SEGUNDOS_OFFSET: i32 = 5 * 3600;

pub fn bogota() -> FixedOffset {
    FixedOffset::west_opt(SEGUNDOS_OFFSET).expect("UTC-05:00 es un desfase válido")
}

pub fn ahora_bogota() -> NaiveDateTime {
    Utc::now().with_timezone(&bogota()).naive_local()
}

pub fn hoy_bogota() -> NaiveDate {
    ahora_bogota().date()
}

/// Interpreta un timestamp tal como lo envía el backend.
///
/// Acepta RFC3339 con desfase (se convierte a hora de Bogotá), fechas con
/// hora sin desfase y fechas a secas (se les asigna medianoche). Comparar el
/// string UTC serializado produciría corrimientos de un día cerca de la
/// medianoche local; por eso siempre se normaliza antes de comparar.
pub fn parse_fecha_backend(valor: &str) -> Option<NaiveDateTime> {
    if let Ok(con_desfase) = DateTime::parse_from_rfc3339(valor) {
        return Some(con_desfase.with_timezone(&bogota()).naive_local());
    }
    for formato in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(fecha) = NaiveDateTime::parse_from_str(valor, formato) {
            return Some(fecha);
        }
    }
    NaiveDate::parse_from_str(valor, "%Y-%m-%d")
        .ok()
        .map(|dia| dia.and_time(NaiveTime::MIN))
}

pub const MESES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub const DIAS_SEMANA: [&str; 7] = [
    "Domingo",
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
];

/// Nombre del mes (1 a 12).
pub fn nombre_mes(mes: u32) -> &'static str {
    MESES.get(mes.saturating_sub(1) as usize).copied().unwrap_or("")
}

pub fn nombre_dia(dia: chrono::Weekday) -> &'static str {
    DIAS_SEMANA[dia.num_days_from_sunday() as usize]
}

/// "10 de enero de 2025"
pub fn formatear_fecha(fecha: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{} de {} de {}",
        fecha.day(),
        nombre_mes(fecha.month()).to_lowercase(),
        fecha.year()
    )
}

/// "10/01/2025 08:00"
pub fn formatear_fecha_hora(fecha: NaiveDateTime) -> String {
    fecha.format("%d/%m/%Y %H:%M").to_string()
}

/// Rango legible; si ambas fechas caen el mismo día solo se repite la hora.
pub fn formatear_rango(inicio: NaiveDateTime, fin: NaiveDateTime) -> String {
    if inicio.date() == fin.date() {
        format!("{} a {}", formatear_fecha_hora(inicio), fin.format("%H:%M"))
    } else {
        format!("{} a {}", formatear_fecha_hora(inicio), formatear_fecha_hora(fin))
    }
}

/// "2 h", "1 h 30 min" o "45 min". Rangos invertidos cuentan como cero.
pub fn calcular_duracion(inicio: NaiveDateTime, fin: NaiveDateTime) -> String {
    let minutos = (fin - inicio).num_minutes().max(0);
    let horas = minutos / 60;
    let resto = minutos % 60;
    match (horas, resto) {
        (0, minutos) => format!("{minutos} min"),
        (horas, 0) => format!("{horas} h"),
        (horas, resto) => format!("{horas} h {resto} min"),
    }
}

/// Hora actual redondeada hacia abajo a la hora en punto.
pub fn hora_en_punto(ahora: NaiveDateTime) -> NaiveDateTime {
    let hora = NaiveTime::from_hms_opt(ahora.time().hour(), 0, 0).unwrap_or(NaiveTime::MIN);
    ahora.date().and_time(hora)
}

/// Serde para timestamps del backend (`NaiveDateTime` en hora de Bogotá).
pub mod serde_fecha {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(fecha: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&fecha.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let crudo = String::deserialize(d)?;
        super::parse_fecha_backend(&crudo)
            .ok_or_else(|| serde::de::Error::custom(format!("fecha ilegible: {crudo}")))
    }
}

/// Serde para fechas de día completo; tolera que el backend mande un
/// datetime y se queda con el día local.
pub mod serde_dia {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dia: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dia.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let crudo = String::deserialize(d)?;
        super::parse_fecha_backend(&crudo)
            .map(|fecha| fecha.date())
            .ok_or_else(|| serde::de::Error::custom(format!("fecha ilegible: {crudo}")))
    }
}
