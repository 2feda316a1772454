//! Chain escapes: `tap`, `repeat` and `for_each`.
//!
//! Callbacks run synchronously with the facade passed in, so a chain can branch into
//! ordinary Rust control flow and resume afterwards.

use super::Canvas;
use crate::context::RenderingContext2d;
use crate::error::{CanvasError, CanvasResult};
use std::ops::ControlFlow;

/// Return value of an iteration callback: whether to keep iterating.
///
/// `()` and `true` continue, `false` stops. `ControlFlow::Break` stops too.
pub trait IterationControl {
    fn should_continue(self) -> bool;
}

impl IterationControl for () {
    fn should_continue(self) -> bool {
        true
    }
}

impl IterationControl for bool {
    fn should_continue(self) -> bool {
        self
    }
}

impl<B> IterationControl for ControlFlow<B> {
    fn should_continue(self) -> bool {
        self.is_continue()
    }
}

impl<C: RenderingContext2d> Canvas<C> {
    /// Run `callback` with the facade and continue the chain.
    pub fn tap<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        callback(&mut *self);
        self
    }

    /// Call `callback` once per step of a numeric range.
    ///
    /// `bounds` is `[count]` (from 0 to `count`), `[start, end]`, or
    /// `[start, end, step]`. The end is exclusive. Without a step the range counts up
    /// or down by one towards `end`; a zero step, or a step pointing away from `end`,
    /// runs nothing.
    pub fn repeat<F, R>(&mut self, bounds: &[f64], mut callback: F) -> CanvasResult<&mut Self>
    where
        F: FnMut(&mut Self, f64) -> R,
        R: IterationControl,
    {
        let (start, end, step) = match *bounds {
            [count] => (0.0, count, 1.0),
            [start, end] => (start, end, if end < start { -1.0 } else { 1.0 }),
            [start, end, step] => (start, end, step),
            _ => {
                return Err(CanvasError::InvalidArgumentCount {
                    operation: "repeat",
                    count: bounds.len(),
                })
            }
        };
        log::debug!(target: "canvas", "repeat {} {} {}", start, end, step);

        if step == 0.0 || !step.is_finite() {
            return Ok(self);
        }

        let mut i = 0u64;
        loop {
            let value = start + step * i as f64;
            let in_range = if step > 0.0 { value < end } else { value > end };
            if !in_range || !callback(&mut *self, value).should_continue() {
                break;
            }
            i += 1;
        }
        Ok(self)
    }

    /// Call `callback` with each item and its index, in order.
    pub fn for_each<I, F, R>(&mut self, items: I, mut callback: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item, usize) -> R,
        R: IterationControl,
    {
        for (index, item) in items.into_iter().enumerate() {
            if !callback(&mut *self, item, index).should_continue() {
                break;
            }
        }
        self
    }
}
