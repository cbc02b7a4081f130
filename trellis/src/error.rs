//! Error types.

use thiserror::Error;

use crate::tree::WidgetId;

/// A rejected structural mutation. The tree is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("unknown widget: {0:?}")]
    UnknownWidget(WidgetId),

    #[error("widget {child:?} is already attached to {parent:?}")]
    AlreadyParented { child: WidgetId, parent: WidgetId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: WidgetId, child: WidgetId },
}

/// Host configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
