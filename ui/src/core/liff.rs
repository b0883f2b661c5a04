//! LINE Front-end Framework (LIFF) login gate.
//!
//! The app is usable once the embedded browser has an authenticated LINE
//! session. Startup runs [`sign_in`] once; the views only look at the
//! resulting [`LoginStatus`].

use dioxus::logger::tracing::{error, info, warn};
use futures::future::LocalBoxFuture;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("LIFF SDK is not loaded")]
    SdkMissing,
    #[error("LIFF ID is not configured")]
    MissingLiffId,
    #[error("{0}")]
    Sdk(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStatus {
    #[default]
    Pending,
    Ready,
    /// `login()` was called; the browser is leaving for the LINE login page.
    Redirecting,
    Failed(String),
}

/// The three LIFF calls the app depends on.
pub trait LoginGate {
    fn initialize(&self, liff_id: &str) -> LocalBoxFuture<'_, Result<(), AuthError>>;
    fn is_logged_in(&self) -> Result<bool, AuthError>;
    fn login(&self) -> Result<(), AuthError>;
}

/// Initialize LIFF and send unauthenticated users to login.
///
/// An initialization failure is remembered but does not stop the login
/// check, so a half-initialized SDK still gets the chance to redirect.
pub async fn sign_in(gate: &dyn LoginGate, liff_id: Option<&str>) -> LoginStatus {
    let Some(liff_id) = liff_id else {
        warn!("MOODMETER_LIFF_ID not set, skipping LINE login");
        return LoginStatus::Failed(AuthError::MissingLiffId.to_string());
    };

    let init_error = gate.initialize(liff_id).await.err();
    if let Some(err) = &init_error {
        error!("liff init error: {err}");
    }

    match gate.is_logged_in() {
        Ok(true) => match init_error {
            Some(err) => LoginStatus::Failed(err.to_string()),
            None => {
                info!("LINE session active");
                LoginStatus::Ready
            }
        },
        Ok(false) => match gate.login() {
            Ok(()) => {
                info!("redirecting to LINE login");
                LoginStatus::Redirecting
            }
            Err(err) => {
                error!("liff login failed: {err}");
                LoginStatus::Failed(err.to_string())
            }
        },
        Err(err) => LoginStatus::Failed(init_error.unwrap_or(err).to_string()),
    }
}

/// Gate used outside the browser, where no LIFF SDK exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableGate;

impl LoginGate for UnavailableGate {
    fn initialize(&self, _liff_id: &str) -> LocalBoxFuture<'_, Result<(), AuthError>> {
        Box::pin(async { Err(AuthError::SdkMissing) })
    }

    fn is_logged_in(&self) -> Result<bool, AuthError> {
        Err(AuthError::SdkMissing)
    }

    fn login(&self) -> Result<(), AuthError> {
        Err(AuthError::SdkMissing)
    }
}

#[cfg(target_arch = "wasm32")]
pub use sdk::LiffSdk;

/// The gate matching the current build target.
pub fn platform_gate() -> Box<dyn LoginGate> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LiffSdk)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(UnavailableGate)
    }
}

#[cfg(target_arch = "wasm32")]
mod sdk {
    use futures::future::LocalBoxFuture;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    use super::{AuthError, LoginGate};
    use crate::core::platform::{has_global, js_error_message};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = liff, js_name = init, catch)]
        fn liff_init(config: &JsValue) -> Result<js_sys::Promise, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = isLoggedIn, catch)]
        fn liff_is_logged_in() -> Result<bool, JsValue>;

        #[wasm_bindgen(js_namespace = liff, js_name = login, catch)]
        fn liff_login() -> Result<(), JsValue>;
    }

    /// Binding to the global `liff` object of the LIFF SDK script.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LiffSdk;

    fn ensure_loaded() -> Result<(), AuthError> {
        if has_global("liff") {
            Ok(())
        } else {
            Err(AuthError::SdkMissing)
        }
    }

    fn sdk_error(err: JsValue) -> AuthError {
        AuthError::Sdk(js_error_message(&err))
    }

    impl LoginGate for LiffSdk {
        fn initialize(&self, liff_id: &str) -> LocalBoxFuture<'_, Result<(), AuthError>> {
            let liff_id = liff_id.to_string();
            Box::pin(async move {
                ensure_loaded()?;
                let config = js_sys::Object::new();
                js_sys::Reflect::set(&config, &"liffId".into(), &liff_id.into())
                    .map_err(sdk_error)?;
                let promise = liff_init(&config).map_err(sdk_error)?;
                JsFuture::from(promise).await.map_err(sdk_error)?;
                Ok(())
            })
        }

        fn is_logged_in(&self) -> Result<bool, AuthError> {
            ensure_loaded()?;
            liff_is_logged_in().map_err(sdk_error)
        }

        fn login(&self) -> Result<(), AuthError> {
            ensure_loaded()?;
            liff_login().map_err(sdk_error)
        }
    }
}
