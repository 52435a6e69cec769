use thiserror::Error;

/// Fallas detectadas en el cliente antes de tocar la red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("la fecha de fin debe ser posterior a la fecha de inicio")]
    InvalidRange,

    #[error("no se pueden programar clases en fechas pasadas")]
    PastDate,

    #[error("faltan campos obligatorios")]
    CamposIncompletos,

    #[error("el formulario no ha sido validado")]
    SinValidar,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validación: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuración: {0}")]
    Config(String),

    #[error("error de red: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("la sesión ha expirado")]
    AuthExpired,

    #[error("respuesta ilegible del backend: {0}")]
    Decode(String),
}
