pub mod asistencia;
pub mod clase;

pub use asistencia::AsistenciaForm;
pub use clase::{ClaseForm, EstadoForm};
