//! Estado de credenciales compartido por el cliente HTTP.
//!
//! El token vive en un único lugar y se pasa explícitamente al constructor
//! del cliente; cuando el backend responde 401 la sesión se expira una sola
//! vez y los observadores se enteran por el canal `watch`.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::info;

#[derive(Clone)]
pub struct Session {
    token: Arc<Mutex<Option<String>>>,
    expirada: Arc<watch::Sender<bool>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            token: Arc::new(Mutex::new(token)),
            expirada: Arc::new(tx),
        }
    }

    pub fn anonima() -> Self {
        Self::new(None)
    }

    pub fn con_token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }

    fn guardia(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn token(&self) -> Option<String> {
        self.guardia().clone()
    }

    pub fn activa(&self) -> bool {
        self.guardia().is_some()
    }

    /// Guarda el token tras un login exitoso y reinicia la señal de expiración.
    pub fn iniciar(&self, token: impl Into<String>) {
        *self.guardia() = Some(token.into());
        let _ = self.expirada.send(false);
    }

    /// Borra el token y avisa a quien esté observando. Idempotente.
    pub fn expirar(&self) {
        let habia_token = self.guardia().take().is_some();
        if habia_token {
            info!("sesión expirada; credenciales descartadas");
        }
        let _ = self.expirada.send(true);
    }

    /// Canal de solo lectura que pasa a `true` cuando la sesión expira.
    pub fn al_expirar(&self) -> watch::Receiver<bool> {
        self.expirada.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expirar_borra_el_token_y_notifica() {
        let sesion = Session::con_token("abc");
        let rx = sesion.al_expirar();
        assert!(sesion.activa());
        assert!(!*rx.borrow());

        sesion.expirar();
        assert!(!sesion.activa());
        assert!(sesion.token().is_none());
        assert!(*rx.borrow());
    }

    #[test]
    fn iniciar_reactiva_una_sesion_expirada() {
        let sesion = Session::anonima();
        sesion.expirar();
        sesion.iniciar("nuevo-token");
        assert_eq!(sesion.token().as_deref(), Some("nuevo-token"));
        assert!(!*sesion.al_expirar().borrow());
    }

    #[test]
    fn los_clones_comparten_estado() {
        let sesion = Session::con_token("abc");
        let clon = sesion.clone();
        clon.expirar();
        assert!(!sesion.activa());
    }
}
