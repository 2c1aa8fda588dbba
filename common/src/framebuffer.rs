//! Double framebuffer and pixel-level drawing.
//!
//! [`FrameStore`] owns two bit-packed buffers laid out exactly like the
//! controller's GDDRAM:
//!
//! - `current`: what the caller is drawing
//! - `prior`: what the panel is believed to show (last transmitted frame)
//!
//! Every drawing operation mutates `current` only. `prior` is updated by the
//! sync engine after a transfer, which is what makes differential updates
//! possible. The dirty flag is set by any write that could have changed
//! `current` and is consumed by the next sync.
//!
//! The store also implements embedded-graphics' [`DrawTarget`] so text, images
//! and the crate's own primitives all land in the same buffer.

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{Dimensions, DrawTarget, OriginDimensions, Size},
    primitives::Rectangle,
};

use crate::{
    color::Color,
    config::{BUFFER_SIZE, HEIGHT, PAGES, WIDTH},
    transform::{self, BitAddress},
};

// =============================================================================
// Framebuffer
// =============================================================================

/// One bit-packed frame: `PAGES` strips of `WIDTH` column bytes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Framebuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl Framebuffer {
    /// All pixels off.
    pub const fn new() -> Self { Self { bytes: [0; BUFFER_SIZE] } }

    /// Raw bytes in controller order.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.bytes }

    /// Column bytes of one page. `page` must be below [`PAGES`].
    #[inline]
    pub fn page(
        &self,
        page: usize,
    ) -> &[u8] {
        debug_assert!(page < PAGES);
        &self.bytes[page * WIDTH..(page + 1) * WIDTH]
    }

    /// Whether the addressed bit is set.
    #[inline]
    pub fn is_set(
        &self,
        addr: BitAddress,
    ) -> bool {
        self.bytes[addr.index] & addr.mask() != 0
    }

    #[inline]
    fn write(
        &mut self,
        addr: BitAddress,
        color: Color,
    ) {
        color.apply(&mut self.bytes[addr.index], addr.mask());
    }

    #[inline]
    fn fill(
        &mut self,
        value: u8,
    ) {
        self.bytes.fill(value);
    }

    #[inline]
    pub(crate) fn copy_from(
        &mut self,
        other: &Framebuffer,
    ) {
        self.bytes.copy_from_slice(&other.bytes);
    }
}

// =============================================================================
// Frame Store
// =============================================================================

/// Drawing surface plus the record of what was last sent to the panel.
#[derive(Clone, Debug, Default)]
pub struct FrameStore {
    current: Framebuffer,
    prior: Framebuffer,
    dirty: bool,
}

impl FrameStore {
    /// Both buffers blank, nothing pending.
    pub const fn new() -> Self {
        Self {
            current: Framebuffer::new(),
            prior: Framebuffer::new(),
            dirty: false,
        }
    }

    /// Frame being drawn.
    #[inline]
    pub const fn current(&self) -> &Framebuffer { &self.current }

    /// Frame last transmitted to the panel.
    #[inline]
    pub const fn prior(&self) -> &Framebuffer { &self.prior }

    /// Whether `current` may differ from `prior`.
    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.current.fill(0x00);
        self.dirty = true;
    }

    /// Write one pixel. Off-panel coordinates and `Transparent` are no-ops.
    #[inline]
    pub fn set_pixel(
        &mut self,
        x: i16,
        y: i16,
        color: Color,
    ) {
        if !color.is_visible() {
            return;
        }
        if let Some(addr) = transform::to_hardware(x, y) {
            self.current.write(addr, color);
            self.dirty = true;
        }
    }

    /// Write one pixel the caller has already clipped to the panel.
    ///
    /// Coordinates outside `0..WIDTH` x `0..HEIGHT` are a caller bug: debug
    /// builds assert, release builds may panic on the buffer index.
    #[inline]
    pub fn set_pixel_unchecked(
        &mut self,
        x: i16,
        y: i16,
        color: Color,
    ) {
        debug_assert!(transform::in_bounds(x, y), "pixel ({}, {}) off panel", x, y);
        if !color.is_visible() {
            return;
        }
        let addr = transform::map(x as usize, y as usize);
        self.current.write(addr, color);
        self.dirty = true;
    }

    /// Read one pixel of `current`. Off-panel reads are [`Color::Off`].
    pub fn get_pixel(
        &self,
        x: i16,
        y: i16,
    ) -> Color {
        match transform::to_hardware(x, y) {
            Some(addr) => Color::from_bit(self.current.is_set(addr)),
            None => Color::Off,
        }
    }

    /// Fill the inclusive rectangle `[x1, x2] x [y1, y2]`, clipped per pixel.
    ///
    /// Corners are not reordered: `x1 > x2` or `y1 > y2` draws nothing.
    pub fn fill_rect(
        &mut self,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Color,
    ) {
        if !color.is_visible() {
            return;
        }
        // Clip once up front; the remaining range is guaranteed on-panel.
        let x_start = x1.max(0);
        let x_end = x2.min(WIDTH as i16 - 1);
        let y_start = y1.max(0);
        let y_end = y2.min(HEIGHT as i16 - 1);
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.set_pixel_unchecked(x, y, color);
            }
        }
    }

    /// Clear the dirty flag, returning whether it was set.
    #[inline]
    pub(crate) fn take_dirty(&mut self) -> bool { core::mem::replace(&mut self.dirty, false) }

    /// Record `current` as the frame the panel now shows.
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.prior.copy_from(&self.current);
        self.dirty = false;
    }
}

// =============================================================================
// embedded-graphics Integration
// =============================================================================

impl OriginDimensions for FrameStore {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for FrameStore {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Points beyond i16 are far off-panel anyway
            if let (Ok(x), Ok(y)) = (i16::try_from(point.x), i16::try_from(point.y)) {
                self.set_pixel(x, y, color.into());
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let color = Color::from(color);
        for y in drawable_area.rows() {
            for x in drawable_area.columns() {
                self.set_pixel_unchecked(x as i16, y as i16, color);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.current.fill(if color.is_on() { 0xFF } else { 0x00 });
        self.dirty = true;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        prelude::{Point, Primitive},
        primitives::PrimitiveStyle,
        Drawable,
    };

    use super::*;

    fn lit_count(store: &FrameStore) -> u32 {
        store.current().as_bytes().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_new_store_is_blank_and_clean() {
        let store = FrameStore::new();
        assert!(!store.is_dirty());
        assert_eq!(lit_count(&store), 0);
        assert_eq!(store.current(), store.prior());
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut store = FrameStore::new();
        store.set_pixel(5, 7, Color::On);
        assert_eq!(store.get_pixel(5, 7), Color::On);
        assert!(store.is_dirty());

        store.set_pixel(5, 7, Color::Off);
        assert_eq!(store.get_pixel(5, 7), Color::Off);

        store.set_pixel(5, 7, Color::Invert);
        assert_eq!(store.get_pixel(5, 7), Color::On);
        store.set_pixel(5, 7, Color::Invert);
        assert_eq!(store.get_pixel(5, 7), Color::Off);
    }

    #[test]
    fn test_out_of_range_writes_are_clipped() {
        let mut store = FrameStore::new();
        for &(x, y) in &[(-1, 0), (0, -1), (128, 0), (0, 64), (i16::MAX, i16::MIN)] {
            store.set_pixel(x, y, Color::On);
            store.set_pixel(x, y, Color::Invert);
        }
        assert_eq!(lit_count(&store), 0);
        assert!(!store.is_dirty());
        assert_eq!(store.get_pixel(-3, 200), Color::Off);
    }

    #[test]
    fn test_transparent_write_keeps_store_clean() {
        let mut store = FrameStore::new();
        store.set_pixel(3, 3, Color::Transparent);
        store.set_pixel_unchecked(4, 4, Color::Transparent);
        store.fill_rect(0, 0, 127, 63, Color::Transparent);
        assert!(!store.is_dirty());
        assert_eq!(lit_count(&store), 0);
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut store = FrameStore::new();
        store.set_pixel(0, 0, Color::On);
        store.commit();
        assert!(!store.is_dirty());

        store.clear();
        assert!(store.is_dirty());
        assert_eq!(lit_count(&store), 0);
        // prior is untouched until a sync commits
        assert_eq!(lit_count_prior(&store), 1);
    }

    fn lit_count_prior(store: &FrameStore) -> u32 {
        store.prior().as_bytes().iter().map(|b| b.count_ones()).sum()
    }

    #[test]
    fn test_fill_rect_is_inclusive() {
        let mut store = FrameStore::new();
        store.fill_rect(2, 3, 4, 5, Color::On);
        assert_eq!(lit_count(&store), 9);
        assert_eq!(store.get_pixel(2, 3), Color::On);
        assert_eq!(store.get_pixel(4, 5), Color::On);
        assert_eq!(store.get_pixel(5, 5), Color::Off);
    }

    #[test]
    fn test_fill_rect_clips_and_ignores_reversed() {
        let mut store = FrameStore::new();
        store.fill_rect(-10, -10, 1, 1, Color::On);
        assert_eq!(lit_count(&store), 4);

        let mut store = FrameStore::new();
        store.fill_rect(10, 10, 5, 5, Color::On);
        assert_eq!(lit_count(&store), 0);
        assert!(!store.is_dirty());

        let mut store = FrameStore::new();
        store.fill_rect(i16::MIN, i16::MIN, i16::MAX, i16::MAX, Color::On);
        assert_eq!(lit_count(&store), (WIDTH * HEIGHT) as u32);
    }

    #[test]
    fn test_take_dirty_and_commit() {
        let mut store = FrameStore::new();
        store.set_pixel(1, 1, Color::On);
        assert!(store.take_dirty());
        assert!(!store.take_dirty());

        store.commit();
        assert_eq!(store.current(), store.prior());
    }

    #[test]
    fn test_page_slices() {
        let mut store = FrameStore::new();
        // (127, 63) maps to column 0 of page 0
        store.set_pixel(127, 63, Color::On);
        assert_eq!(store.current().page(0)[0], 0x01);
        assert_eq!(store.current().page(0).len(), WIDTH);
        assert!(store.current().page(7).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_target_primitives() {
        let mut store = FrameStore::new();
        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut store)
            .unwrap();
        assert_eq!(lit_count(&store), 4);
        assert_eq!(store.get_pixel(1, 1), Color::On);

        Pixel(Point::new(100_000, 5), BinaryColor::On).draw(&mut store).unwrap();
        Pixel(Point::new(10, 5), BinaryColor::On).draw(&mut store).unwrap();
        assert_eq!(lit_count(&store), 5);
    }

    #[test]
    fn test_draw_target_clear() {
        let mut store = FrameStore::new();
        DrawTarget::clear(&mut store, BinaryColor::On).unwrap();
        assert_eq!(lit_count(&store), (WIDTH * HEIGHT) as u32);
        assert!(store.is_dirty());
        assert_eq!(store.bounding_box().size, Size::new(128, 64));
    }
}
