use serde::{Deserialize, Serialize};

/// Profesora registrada en el backend. Solo lectura desde este cliente.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profesora {
    pub id: i64,
    pub nombre: String,
    /// Presente en `/me` y `/profesoras`; los registros anidados lo omiten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub especialidad: String,
}
