//! Editing session over a single model.

use std::fmt;

use log::{info, warn};

use annoview_core::view::{RenderedView, ViewKind};

use crate::{RenderStatus, ViewBuilder};

/// The pipe model a new session starts from.
pub const DEFAULT_MODEL: &str = include_str!("default_model.mo");

/// The current model code and its most recently rendered views.
///
/// A view that fails to render keeps the drawing from the last successful
/// update, so a broken edit never blanks the display.
pub struct ModelSession {
    builder: ViewBuilder,
    code: String,
    icon: Option<RenderedView>,
    diagram: Option<RenderedView>,
}

impl ModelSession {
    /// Starts a session on [`DEFAULT_MODEL`].
    pub fn new(builder: ViewBuilder) -> Self {
        Self::with_code(builder, DEFAULT_MODEL)
    }

    /// Starts a session on the given model code.
    pub fn with_code(builder: ViewBuilder, code: impl Into<String>) -> Self {
        let mut session = Self {
            builder,
            code: String::new(),
            icon: None,
            diagram: None,
        };
        session.update_code(code);
        session
    }

    /// Replaces the model code and re-renders both views.
    pub fn update_code(&mut self, new_code: impl Into<String>) -> UpdateReport {
        self.code = new_code.into();

        let views = self.builder.render(&self.code);
        let report = UpdateReport {
            icon: views.status(ViewKind::Icon),
            diagram: views.status(ViewKind::Diagram),
        };

        match views.icon {
            Ok(view) => self.icon = Some(view),
            Err(err) => warn!(err:%; "Keeping previous Icon view"),
        }
        match views.diagram {
            Ok(view) => self.diagram = Some(view),
            Err(err) => warn!(err:%; "Keeping previous Diagram view"),
        }

        info!(icon:% = report.icon, diagram:% = report.diagram; "Model code updated");
        report
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn view(&self, kind: ViewKind) -> Option<&RenderedView> {
        match kind {
            ViewKind::Icon => self.icon.as_ref(),
            ViewKind::Diagram => self.diagram.as_ref(),
        }
    }

    pub fn builder(&self) -> &ViewBuilder {
        &self.builder
    }
}

/// Render status of both views after a code update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub icon: RenderStatus,
    pub diagram: RenderStatus,
}

impl UpdateReport {
    pub fn is_success(&self) -> bool {
        self.icon.is_success() && self.diagram.is_success()
    }
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            f.write_str("Code and views were updated successfully.")
        } else {
            write!(
                f,
                "Code updated. Icon view {}; Diagram view {}.",
                self.icon, self.diagram
            )
        }
    }
}
