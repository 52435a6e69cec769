pub mod asistencia;
pub mod clase;
pub mod profesora;

pub use asistencia::{Aprendiz, Asistencia, DetalleAprendiz, ResumenAprendiz};
pub use clase::{Clase, Ubicacion};
pub use profesora::Profesora;
