pub mod asistencia;
pub mod calendario;
pub mod dashboard;

pub use asistencia::AsistenciaService;
pub use calendario::{CalendarioView, CeldaCalendario};
pub use dashboard::{DashboardService, ResumenDashboard};
