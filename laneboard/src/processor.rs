//! BoardOperationProcessor - runs commands and applies their side effects

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use laneboard_operations::{Execute, OperationProcessor, Value};
use tracing::{debug, trace};

/// Runs commands against a `BoardContext`.
///
/// After a command that changed the store, the processor records its log
/// entry and snapshots the board through the context's gateway. Failed
/// commands are recorded but never persisted.
#[derive(Debug, Clone, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every recorded entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

impl OperationProcessor<BoardContext, BoardError> for BoardOperationProcessor {
    fn process<O>(&self, operation: &O, ctx: &mut BoardContext) -> Result<Value>
    where
        O: Execute<BoardContext, BoardError>,
    {
        let result = operation.execute(ctx);
        let mutated = result.is_mutation();
        let (value, log_entry) = result.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            ctx.append_activity(entry);
        }

        if mutated {
            debug!(op = %operation.op_string(), "applied");
            ctx.persist();
        } else if let Err(error) = &value {
            debug!(op = %operation.op_string(), %error, "rejected");
        } else {
            trace!(op = %operation.op_string(), "no change");
        }

        value
    }
}
