//! ReorderEngine - turns drag gestures into move commands
//!
//! A card drag previews live: every hover that resolves to a new slot runs
//! `MoveCard` right away, and the end event writes nothing further. A column
//! drag only records hover targets and runs a single `MoveColumn` when the
//! gesture ends. Cancelling either kind returns to idle and keeps whatever
//! live moves were already applied.
//!
//! Targets are resolved against the current store on every event; the only
//! state carried between events is the last slot the engine applied.

use crate::card::MoveCard;
use crate::column::MoveColumn;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::ordering::clamp_position;
use crate::processor::BoardOperationProcessor;
use crate::types::{CardId, ColumnId};
use laneboard_operations::{OperationProcessor, Value};
use tracing::{debug, trace};

/// The item picked up by a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    Card(CardId),
    Column(ColumnId),
}

/// What the pointer is over: a card, or a column header / empty area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Card(CardId),
    Column(ColumnId),
}

/// What a gesture event did
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// A drag began
    Started,
    /// A move command ran; carries the moved entity
    Moved(Value),
    /// The target resolved to the slot already applied
    Skipped,
    /// A column drag noted the hovered position
    Recorded,
    /// Nothing to do: idle, or the target no longer exists
    Ignored,
    /// The drag finished without a further write
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    column: ColumnId,
    position: usize,
}

#[derive(Debug)]
enum Drag {
    Card {
        card: CardId,
        origin: Slot,
    },
    Column {
        column: ColumnId,
        origin_position: usize,
        pending: Option<usize>,
    },
}

/// One drag at a time, per engine
#[derive(Debug, Default)]
pub struct ReorderEngine {
    processor: BoardOperationProcessor,
    drag: Option<Drag>,
}

impl ReorderEngine {
    pub fn new(processor: BoardOperationProcessor) -> Self {
        Self {
            processor,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The item currently being dragged
    pub fn dragged(&self) -> Option<DragItem> {
        self.drag.as_ref().map(|drag| match drag {
            Drag::Card { card, .. } => DragItem::Card(card.clone()),
            Drag::Column { column, .. } => DragItem::Column(column.clone()),
        })
    }

    /// Where the dragged card was when the gesture began
    pub fn card_origin(&self) -> Option<(&ColumnId, usize)> {
        match &self.drag {
            Some(Drag::Card { origin, .. }) => Some((&origin.column, origin.position)),
            _ => None,
        }
    }

    /// The column position a column drag would drop at
    pub fn pending_column_position(&self) -> Option<usize> {
        match &self.drag {
            Some(Drag::Column {
                pending,
                origin_position,
                ..
            }) => Some(pending.unwrap_or(*origin_position)),
            _ => None,
        }
    }

    /// Pick up `item`, replacing any drag in progress
    pub fn gesture_start(&mut self, ctx: &BoardContext, item: DragItem) -> Result<GestureOutcome> {
        self.drag = None;
        let store = ctx.store();

        let drag = match item {
            DragItem::Card(card) => {
                let current = store
                    .card(&card)
                    .ok_or_else(|| BoardError::CardNotFound {
                        id: card.to_string(),
                    })?;
                let origin = Slot {
                    column: current.column_id.clone(),
                    position: current.position,
                };
                Drag::Card { card, origin }
            }
            DragItem::Column(column) => {
                let origin_position = store
                    .column(&column)
                    .map(|c| c.position)
                    .ok_or_else(|| BoardError::ColumnNotFound {
                        id: column.to_string(),
                    })?;
                Drag::Column {
                    column,
                    origin_position,
                    pending: None,
                }
            }
        };

        debug!(?drag, "drag started");
        self.drag = Some(drag);
        Ok(GestureOutcome::Started)
    }

    /// The pointer moved over `target`
    pub fn gesture_hover(
        &mut self,
        ctx: &mut BoardContext,
        target: &HoverTarget,
    ) -> Result<GestureOutcome> {
        match self.drag.take() {
            None => Ok(GestureOutcome::Ignored),
            Some(Drag::Card { card, origin }) => self.hover_card(ctx, card, origin, target),
            Some(Drag::Column {
                column,
                origin_position,
                pending,
            }) => {
                if ctx.store().column(&column).is_none() {
                    debug!(%column, "dragged column vanished");
                    return Ok(GestureOutcome::Ignored);
                }
                let resolved = resolve_column_position(ctx, target);
                trace!(?target, ?resolved, "column hover resolved");
                self.drag = Some(Drag::Column {
                    column,
                    origin_position,
                    pending: resolved.or(pending),
                });
                Ok(match resolved {
                    Some(_) => GestureOutcome::Recorded,
                    None => GestureOutcome::Ignored,
                })
            }
        }
    }

    fn hover_card(
        &mut self,
        ctx: &mut BoardContext,
        card: CardId,
        origin: Slot,
        target: &HoverTarget,
    ) -> Result<GestureOutcome> {
        let Some(current) = ctx.store().card(&card).map(|c| Slot {
            column: c.column_id.clone(),
            position: c.position,
        }) else {
            debug!(%card, "dragged card vanished");
            return Ok(GestureOutcome::Ignored);
        };

        let resolved = resolve_card_slot(ctx, &current.column, target);
        self.drag = Some(Drag::Card {
            card: card.clone(),
            origin,
        });
        let Some(slot) = resolved else {
            trace!(?target, "hover target gone");
            return Ok(GestureOutcome::Ignored);
        };
        trace!(?target, column = %slot.column, position = slot.position, "card hover resolved");

        // Compared with where the card is now, not with the last hover.
        if slot == current {
            return Ok(GestureOutcome::Skipped);
        }

        let command = MoveCard::new(card, slot.column, slot.position);
        let outcome = self.processor.process(&command, ctx);

        match outcome {
            Ok(value) => Ok(GestureOutcome::Moved(value)),
            Err(error) if error.is_benign() => {
                debug!(%error, "live move skipped");
                Ok(GestureOutcome::Ignored)
            }
            Err(error) => Err(error),
        }
    }

    /// The pointer was released over `target`; `None` cancels
    pub fn gesture_end(
        &mut self,
        ctx: &mut BoardContext,
        target: Option<&HoverTarget>,
    ) -> Result<GestureOutcome> {
        let Some(drag) = self.drag.take() else {
            return Ok(GestureOutcome::Ignored);
        };

        let (column, pending) = match drag {
            Drag::Card { .. } => return Ok(GestureOutcome::Ended),
            Drag::Column {
                column, pending, ..
            } => (column, pending),
        };
        let Some(target) = target else {
            return Ok(GestureOutcome::Ended);
        };
        let Some(current) = ctx.store().column(&column).map(|c| c.position) else {
            return Ok(GestureOutcome::Ignored);
        };

        let Some(position) = resolve_column_position(ctx, target).or(pending) else {
            return Ok(GestureOutcome::Ended);
        };
        if position == current {
            return Ok(GestureOutcome::Ended);
        }

        match self.processor.process(&MoveColumn::new(column, position), ctx) {
            Ok(value) => Ok(GestureOutcome::Moved(value)),
            Err(error) if error.is_benign() => Ok(GestureOutcome::Ignored),
            Err(error) => Err(error),
        }
    }

    /// Abandon the drag. Live card moves already applied stay applied.
    pub fn cancel(&mut self) -> GestureOutcome {
        match self.drag.take() {
            Some(_) => GestureOutcome::Ended,
            None => GestureOutcome::Ignored,
        }
    }
}

/// Resolve a hover target to the slot `MoveCard` would actually produce
/// for a card currently in `current_column`.
fn resolve_card_slot(
    ctx: &BoardContext,
    current_column: &ColumnId,
    target: &HoverTarget,
) -> Option<Slot> {
    let store = ctx.store();
    let (column, requested) = match target {
        HoverTarget::Card(id) => {
            let hovered = store.card(id)?;
            (hovered.column_id.clone(), hovered.position)
        }
        HoverTarget::Column(id) => {
            store.column(id)?;
            (id.clone(), store.card_count(id))
        }
    };

    let count = store.card_count(&column);
    let siblings = if &column == current_column {
        count.saturating_sub(1)
    } else {
        count
    };
    Some(Slot {
        position: clamp_position(requested, siblings),
        column,
    })
}

fn resolve_column_position(ctx: &BoardContext, target: &HoverTarget) -> Option<usize> {
    let store = ctx.store();
    let column = match target {
        HoverTarget::Column(id) => store.column(id)?,
        HoverTarget::Card(id) => store.column(&store.card(id)?.column_id)?,
    };
    Some(column.position)
}
