use tracing::{debug, info_span, span::EnteredSpan, warn};

use crate::solvers::SolverType;
use crate::systems::controller::ControllerType;

/// Scope of one run's diagnostics.
///
/// Holds the entered `simulation` span and the warnings raised inside it. The
/// span is exited when the scope is dropped, on success and on early error
/// returns alike.
pub struct DiagnosticsScope {
    warnings: Vec<String>,
    _span: EnteredSpan,
}

impl DiagnosticsScope {
    pub fn enter(solver: SolverType, controller: ControllerType) -> Self {
        let span = info_span!("simulation", ?solver, ?controller).entered();
        Self {
            warnings: Vec::new(),
            _span: span,
        }
    }

    /// Logs a non-fatal condition and keeps it for the run's output.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

impl Drop for DiagnosticsScope {
    fn drop(&mut self) {
        debug!(pending_warnings = self.warnings.len(), "leaving simulation scope");
    }
}
