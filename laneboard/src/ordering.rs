//! Gap-close / gap-open arithmetic shared by card and column moves.
//!
//! Every helper operates on the *siblings* of the item being moved, never on
//! the item itself. Callers filter it out before calling.

use crate::types::{Card, Column};

/// Anything holding a zero-based rank among its siblings
pub(crate) trait Ranked {
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

impl Ranked for Column {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

impl Ranked for Card {
    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// Clamp a requested insertion index into `[0, sibling_count]`
pub(crate) fn clamp_position(requested: usize, sibling_count: usize) -> usize {
    requested.min(sibling_count)
}

/// Close the gap at `vacated`: every sibling after it moves up by one.
pub(crate) fn close_gap<'a, T, I>(siblings: I, vacated: usize)
where
    T: Ranked + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    for sibling in siblings {
        if sibling.position() > vacated {
            sibling.set_position(sibling.position() - 1);
        }
    }
}

/// Open a gap at `at`: every sibling at or after it moves down by one.
pub(crate) fn open_gap<'a, T, I>(siblings: I, at: usize)
where
    T: Ranked + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    for sibling in siblings {
        if sibling.position() >= at {
            sibling.set_position(sibling.position() + 1);
        }
    }
}

/// Shift siblings for a move from `from` to `to` within the same set.
///
/// Moving down (`from < to`), siblings in `(from, to]` move up by one.
/// Moving up (`to < from`), siblings in `[to, from)` move down by one.
pub(crate) fn shift_between<'a, T, I>(siblings: I, from: usize, to: usize)
where
    T: Ranked + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    if from == to {
        return;
    }
    for sibling in siblings {
        let p = sibling.position();
        if from < to && p > from && p <= to {
            sibling.set_position(p - 1);
        } else if to < from && p >= to && p < from {
            sibling.set_position(p + 1);
        }
    }
}

/// Re-rank a sibling set to `0..len`, keeping the current relative order.
///
/// The sort is stable, so items sharing a position keep their input order.
pub(crate) fn rerank<T: Ranked>(siblings: &mut [&mut T]) {
    siblings.sort_by_key(|item| item.position());
    for (position, item) in siblings.iter_mut().enumerate() {
        item.set_position(position);
    }
}

/// True when the positions are exactly `0..len` with no duplicates
pub(crate) fn is_contiguous(mut positions: Vec<usize>) -> bool {
    positions.sort_unstable();
    positions.iter().enumerate().all(|(i, p)| i == *p)
}
