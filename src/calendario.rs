//! Grilla mensual del calendario y agrupación de clases por día.
//!
//! La grilla es siempre de 6 semanas por 7 días (42 celdas) empezando en
//! domingo, con los días colgantes del mes anterior y siguiente marcados
//! como fuera del mes. Todo se calcula con aritmética de calendario, nunca
//! con conteos fijos de días, y "hoy" llega siempre como parámetro.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Clase;

/// Máximo de clases que se muestran dentro de una celda del calendario.
pub const MAX_VISIBLES: usize = 2;

pub const CELDAS: usize = 42;

/// Celda derivada de la grilla; se recalcula en cada render y no se persiste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaCalendario {
    pub fecha: NaiveDate,
    pub del_mes: bool,
    pub es_hoy: bool,
    pub es_pasado: bool,
}

fn primer_dia(mes: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(mes.year(), mes.month(), 1).unwrap_or(mes)
}

/// Las 42 celdas del mes de `referencia`, comparadas contra el `hoy` inyectado.
pub fn grilla_mes(referencia: NaiveDate, hoy: NaiveDate) -> Vec<DiaCalendario> {
    let primero = primer_dia(referencia);
    let colgantes = i64::from(primero.weekday().num_days_from_sunday());
    let desde = primero - Duration::days(colgantes);

    (0..CELDAS as i64)
        .map(|i| {
            let fecha = desde + Duration::days(i);
            DiaCalendario {
                fecha,
                del_mes: fecha.month() == referencia.month()
                    && fecha.year() == referencia.year(),
                es_hoy: fecha == hoy,
                es_pasado: fecha < hoy,
            }
        })
        .collect()
}

/// Primer día del mes anterior al de `referencia`.
pub fn mes_anterior(referencia: NaiveDate) -> NaiveDate {
    let (anio, mes) = match referencia.month() {
        1 => (referencia.year() - 1, 12),
        otro => (referencia.year(), otro - 1),
    };
    NaiveDate::from_ymd_opt(anio, mes, 1).unwrap_or(referencia)
}

/// Primer día del mes siguiente al de `referencia`.
pub fn mes_siguiente(referencia: NaiveDate) -> NaiveDate {
    let (anio, mes) = match referencia.month() {
        12 => (referencia.year() + 1, 1),
        otro => (referencia.year(), otro + 1),
    };
    NaiveDate::from_ymd_opt(anio, mes, 1).unwrap_or(referencia)
}

/// Clases cuyo inicio cae en el día calendario `dia`, ordenadas por hora.
///
/// La comparación usa la fecha local ya normalizada, no el string
/// serializado, para no correrse de día cerca de la medianoche.
pub fn clases_del_dia<'a>(clases: &'a [Clase], dia: NaiveDate) -> Vec<&'a Clase> {
    let mut del_dia: Vec<&Clase> = clases
        .iter()
        .filter(|clase| clase.dia_inicio() == dia)
        .collect();
    del_dia.sort_by_key(|clase| clase.fecha_inicio);
    del_dia
}

/// Lo que cabe en una celda: hasta [`MAX_VISIBLES`] clases y el "+N más".
#[derive(Debug, Clone)]
pub struct VistaDia<'a> {
    pub visibles: Vec<&'a Clase>,
    pub adicionales: usize,
}

pub fn vista_dia<'a>(clases: &'a [Clase], dia: NaiveDate) -> VistaDia<'a> {
    let todas = clases_del_dia(clases, dia);
    let adicionales = todas.len().saturating_sub(MAX_VISIBLES);
    VistaDia {
        visibles: todas.into_iter().take(MAX_VISIBLES).collect(),
        adicionales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profesora, Ubicacion};
    use chrono::Weekday;

    fn dia(anio: i32, mes: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(anio, mes, d).unwrap()
    }

    fn clase(id: i64, inicio: &str, fin: &str) -> Clase {
        Clase {
            id,
            profesora_id: Some(1),
            titulo: format!("Clase {id}"),
            fecha_inicio: crate::fechas::parse_fecha_backend(inicio).unwrap(),
            fecha_fin: crate::fechas::parse_fecha_backend(fin).unwrap(),
            ubicacion: Ubicacion::Colegio,
            descripcion: None,
            profesora: Profesora {
                id: 1,
                nombre: "Ana".to_string(),
                email: None,
                especialidad: "Robótica".to_string(),
            },
        }
    }

    #[test]
    fn la_grilla_siempre_tiene_42_celdas_y_arranca_en_domingo() {
        for referencia in [
            dia(2024, 2, 1),
            dia(2025, 1, 15),
            dia(2025, 12, 31),
            dia(2023, 2, 14), // febrero no bisiesto
            dia(2025, 6, 1),  // mes que arranca en domingo
        ] {
            let grilla = grilla_mes(referencia, dia(2025, 1, 1));
            assert_eq!(grilla.len(), CELDAS);
            assert_eq!(grilla[0].fecha.weekday(), Weekday::Sun);

            // un único tramo contiguo del mes, del largo exacto del mes
            let del_mes: Vec<usize> = grilla
                .iter()
                .enumerate()
                .filter(|(_, c)| c.del_mes)
                .map(|(i, _)| i)
                .collect();
            let largo_mes = mes_siguiente(referencia)
                .signed_duration_since(primer_dia(referencia))
                .num_days() as usize;
            assert_eq!(del_mes.len(), largo_mes);
            assert_eq!(del_mes.last().unwrap() - del_mes[0], largo_mes - 1);
        }
    }

    #[test]
    fn febrero_bisiesto_2024() {
        // Febrero de 2024 empieza en jueves: 4 celdas colgantes de enero
        // y 29 días del mes.
        let grilla = grilla_mes(dia(2024, 2, 1), dia(2024, 2, 10));
        assert_eq!(grilla.iter().take_while(|c| !c.del_mes).count(), 4);
        assert_eq!(grilla.iter().filter(|c| c.del_mes).count(), 29);
        assert_eq!(grilla[4].fecha, dia(2024, 2, 1));
        assert_eq!(grilla[0].fecha, dia(2024, 1, 28));
    }

    #[test]
    fn hoy_y_pasado_se_comparan_contra_el_hoy_inyectado() {
        let grilla = grilla_mes(dia(2025, 1, 1), dia(2025, 1, 10));
        let celda_hoy = grilla.iter().find(|c| c.es_hoy).unwrap();
        assert_eq!(celda_hoy.fecha, dia(2025, 1, 10));
        assert!(!celda_hoy.es_pasado);
        assert!(grilla.iter().any(|c| c.fecha == dia(2025, 1, 9) && c.es_pasado));
        assert!(grilla.iter().any(|c| c.fecha == dia(2025, 1, 11) && !c.es_pasado));
    }

    #[test]
    fn navegacion_de_meses_con_cambio_de_anio() {
        assert_eq!(mes_anterior(dia(2025, 1, 15)), dia(2024, 12, 1));
        assert_eq!(mes_siguiente(dia(2024, 12, 3)), dia(2025, 1, 1));
        assert_eq!(mes_siguiente(dia(2025, 1, 31)), dia(2025, 2, 1));
    }

    #[test]
    fn una_clase_cerca_de_medianoche_no_se_corre_de_dia() {
        // Serializada en UTC cruzaría al 1 de abril; en hora local es 31 de marzo.
        let clases = vec![clase(1, "2025-04-01T04:30:00Z", "2025-04-01T06:30:00Z")];
        assert_eq!(clases_del_dia(&clases, dia(2025, 3, 31)).len(), 1);
        assert!(clases_del_dia(&clases, dia(2025, 4, 1)).is_empty());
    }

    #[test]
    fn la_celda_muestra_dos_clases_y_cuenta_el_resto() {
        let clases = vec![
            clase(1, "2025-01-10T10:00:00", "2025-01-10T12:00:00"),
            clase(2, "2025-01-10T08:00:00", "2025-01-10T10:00:00"),
            clase(3, "2025-01-10T14:00:00", "2025-01-10T16:00:00"),
            clase(4, "2025-01-11T08:00:00", "2025-01-11T10:00:00"),
        ];
        let vista = vista_dia(&clases, dia(2025, 1, 10));
        assert_eq!(vista.visibles.len(), 2);
        // orden ascendente por hora de inicio
        assert_eq!(vista.visibles[0].id, 2);
        assert_eq!(vista.visibles[1].id, 1);
        assert_eq!(vista.adicionales, 1);

        let vacia = vista_dia(&clases, dia(2025, 1, 12));
        assert!(vacia.visibles.is_empty());
        assert_eq!(vacia.adicionales, 0);
    }
}
