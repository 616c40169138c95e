//! TypeScript compilation behind a lazily-initialized service.
//!
//! The underlying toolchain pays a noticeable one-time setup cost, so the
//! service is warmed up exactly once and every caller funnels through the
//! shared instance. The lifecycle is an explicit three-state machine so
//! that concurrent first callers never start a second warm-up.

mod compile;
mod error;
mod parser;

use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

use spell_transform::{ScriptCompileError, ScriptCompiler};

pub use compile::compile_typescript;
pub use error::{ScriptError, ScriptErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Upper bound on a single wait for a warm-up happening on another thread.
/// Spurious wakeups and timeouts both loop back to a state check.
const WAIT_INTERVAL: Duration = Duration::from_millis(500);

/// The SWC-backed [`ScriptCompiler`]. Cheap to construct, lazily warmed up
/// on first use.
#[derive(Debug)]
pub struct SwcScriptCompiler {
    state: Mutex<ServiceState>,
    ready: Condvar,
}

impl Default for SwcScriptCompiler {
    fn default() -> Self {
        SwcScriptCompiler {
            state: Mutex::new(ServiceState::Uninitialized),
            ready: Condvar::new(),
        }
    }
}

impl SwcScriptCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the service is warmed up, performing the warm-up on
    /// this thread if nobody else has started it.
    pub fn ensure_started(&self) {
        // A poisoned lock still holds a valid state word.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            match *state {
                ServiceState::Ready => return,
                ServiceState::Initializing => {
                    let (guard, _) = self
                        .ready
                        .wait_timeout(state, WAIT_INTERVAL)
                        .unwrap_or_else(PoisonError::into_inner);
                    state = guard;
                }
                ServiceState::Uninitialized => {
                    *state = ServiceState::Initializing;
                    drop(state);

                    // Pay the one-time toolchain setup cost up front so the
                    // first real compile is not the slow one.
                    let _ = compile_typescript("", None, false);

                    let mut state =
                        self.state.lock().unwrap_or_else(PoisonError::into_inner);
                    *state = ServiceState::Ready;
                    self.ready.notify_all();
                    tracing::info!("TypeScript compiler loaded");
                    return;
                }
            }
        }
    }
}

impl ScriptCompiler for SwcScriptCompiler {
    fn compile(
        &self,
        source: &str,
        file_name: Option<&str>,
        minify: bool,
    ) -> Result<String, ScriptCompileError> {
        self.ensure_started();

        compile_typescript(source, file_name, minify).map_err(|e| ScriptCompileError {
            message: e.to_string(),
        })
    }
}
