//! Drawer slide tracking.
//!
//! Converts a drawer's raw slide offset into icon updates: the offset becomes
//! the parameter, and the flip flag latches when the drawer settles fully
//! open or fully closed so the return sweep rotates the other way.

use super::{DrawableError, DrawerArrowDrawable};

/// Offset at or above which the drawer counts as fully open.
pub const OPEN_THRESHOLD: f32 = 0.995;

/// Offset at or below which the drawer counts as fully closed.
pub const CLOSED_THRESHOLD: f32 = 0.005;

/// Icon state derived from one slide event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideUpdate {
    pub parameter: f32,
    pub flip: bool,
}

/// Tracks drawer slide offsets and the latched flip state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawerSlide {
    offset: f32,
    flipped: bool,
}

impl DrawerSlide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Record a slide event. NaN offsets are ignored.
    ///
    /// Offsets often stop just short of 0 or 1, hence the thresholds.
    pub fn on_slide(&mut self, offset: f32) -> SlideUpdate {
        if !offset.is_nan() {
            self.offset = offset.clamp(0.0, 1.0);
            if self.offset >= OPEN_THRESHOLD {
                self.flipped = true;
            } else if self.offset <= CLOSED_THRESHOLD {
                self.flipped = false;
            }
        }

        SlideUpdate {
            parameter: self.offset,
            flip: self.flipped,
        }
    }

    /// Record a slide event and push the result into `drawable`.
    pub fn apply(
        &mut self,
        offset: f32,
        drawable: &mut DrawerArrowDrawable,
    ) -> Result<SlideUpdate, DrawableError> {
        let update = self.on_slide(offset);
        if update.flip != drawable.flip() {
            drawable.set_flip(update.flip);
        }
        drawable.set_parameter(update.parameter)?;
        Ok(update)
    }
}
