//! Process-wide compute engine handle.
//!
//! The vectorized compute runtime is expensive to bring up and memory
//! constrained, so the process holds exactly one handle to it: first use
//! initializes it, every later use reuses the recorded outcome, and it is
//! never torn down for the life of the process. Initialization failure is
//! recorded too: callers get the same [`ForecastError::EngineUnavailable`]
//! on every subsequent access and are expected to degrade to the synthetic
//! fallback path instead of failing the request.

use crate::error::{ForecastError, Result};
use log::{info, warn};
use polars::prelude::*;
use std::sync::OnceLock;

/// Environment variable that forces the engine into the unavailable state.
///
/// Setting it to any value makes initialization fail, which is how deployments
/// under hard memory pressure (and the degraded-mode tests) exercise the
/// fallback path.
pub const DISABLE_ENGINE_ENV: &str = "PANDEMIC_FORECAST_DISABLE_ENGINE";

static ENGINE: OnceLock<std::result::Result<ComputeEngine, String>> = OnceLock::new();

/// Handle to the process-wide vectorized compute runtime
#[derive(Debug)]
pub struct ComputeEngine {
    worker_threads: usize,
}

impl ComputeEngine {
    /// Access the process-wide engine, initializing it on first use.
    ///
    /// Only the construction path is guarded; subsequent reads are lock-free.
    pub fn global() -> Result<&'static ComputeEngine> {
        match ENGINE.get_or_init(ComputeEngine::initialize) {
            Ok(engine) => Ok(engine),
            Err(reason) => Err(ForecastError::EngineUnavailable(reason.clone())),
        }
    }

    /// Whether the engine came up; never triggers more than one init attempt
    pub fn is_available() -> bool {
        ComputeEngine::global().is_ok()
    }

    /// Number of worker threads the runtime schedules internally
    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    fn initialize() -> std::result::Result<ComputeEngine, String> {
        if std::env::var_os(DISABLE_ENGINE_ENV).is_some() {
            let reason = format!("disabled by configuration ({})", DISABLE_ENGINE_ENV);
            warn!("compute engine {}", reason);
            return Err(reason);
        }

        // Smoke-test the columnar runtime once before declaring it usable.
        let probe = DataFrame::new(vec![Series::new("probe", &[1.0f64, 2.0, 3.0])]);
        match probe {
            Ok(df) if df.height() == 3 => {
                let worker_threads = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                info!(
                    "compute engine initialized with {} worker threads",
                    worker_threads
                );
                Ok(ComputeEngine { worker_threads })
            }
            Ok(_) => {
                let reason = "columnar runtime probe returned an unexpected shape".to_string();
                warn!("compute engine initialization failed: {}", reason);
                Err(reason)
            }
            Err(e) => {
                let reason = format!("columnar runtime probe failed: {}", e);
                warn!("compute engine initialization failed: {}", reason);
                Err(reason)
            }
        }
    }
}
