//! Pushing frames to the panel.
//!
//! [`OledFlusher`] owns the bus and borrows a [`FrameStore`] for each call.
//! A sync either streams every page (full) or only the changed column span of
//! each changed page (differential). In both cases `prior` is brought in line
//! with `current` afterwards.
//!
//! # Bus Failures
//!
//! A failed transaction is only discovered when it closes, after `prior` has
//! already been overwritten. From then on the panel's contents are unknown,
//! so the flusher marks itself out of sync and the next [`OledFlusher::sync`]
//! sends the whole frame regardless of mode or dirty state.

use crate::{
    bus::{Bus, BusError, WriteKind},
    config::{BUS_CLOCK_KHZ, I2C_ADDRESS, PAGES, WIDTH},
    framebuffer::{FrameStore, Framebuffer},
    ssd1306::{self, CONTROL_DATA, Command},
};

// =============================================================================
// Types
// =============================================================================

/// How much of the frame a sync transmits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncMode {
    /// Every byte of every page.
    Full,
    /// Only the changed span of each changed page.
    Differential,
}

/// Result of one sync.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Nothing changed; the bus was not touched.
    NothingToDo,
    /// The frame was sent and the transaction completed.
    FrameDrawn,
    /// The frame was sent but the transaction reported an error.
    FrameNotDrawn(BusError),
}

/// Inclusive range of changed columns within one page.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageSpan {
    pub first: usize,
    pub last: usize,
}

impl PageSpan {
    /// The whole page.
    pub const FULL: Self = Self { first: 0, last: WIDTH - 1 };

    /// Number of bytes in the span.
    pub const fn width(self) -> usize { self.last - self.first + 1 }
}

/// First and last differing byte between two page slices, if any.
pub fn diff_bounds(
    prior: &[u8],
    current: &[u8],
) -> Option<PageSpan> {
    let first = prior.iter().zip(current).position(|(a, b)| a != b)?;
    let last = prior.iter().zip(current).rposition(|(a, b)| a != b)?;
    Some(PageSpan { first, last })
}

// =============================================================================
// Flusher
// =============================================================================

/// Drives an SSD1306 over a [`Bus`].
pub struct OledFlusher<B> {
    bus: B,
    resync_pending: bool,
}

impl<B: Bus> OledFlusher<B> {
    pub const fn new(bus: B) -> Self {
        Self {
            bus,
            resync_pending: false,
        }
    }

    pub fn bus(&self) -> &B { &self.bus }

    /// Give the bus back.
    pub fn release(self) -> B { self.bus }

    /// Whether the next sync will be forced to a full transfer.
    pub const fn resync_pending(&self) -> bool { self.resync_pending }

    /// Blank the store, configure the panel and switch it on showing the
    /// blank frame. The panel must already be out of reset.
    pub fn init(
        &mut self,
        store: &mut FrameStore,
    ) -> Result<(), BusError> {
        log_info!("oled init");
        store.clear();
        self.configure(true)?;
        match self.sync(store, SyncMode::Full) {
            SyncOutcome::FrameNotDrawn(err) => Err(err),
            SyncOutcome::FrameDrawn | SyncOutcome::NothingToDo => {
                log_info!("oled ready");
                Ok(())
            }
        }
    }

    /// Send the register setup in one transaction. With `power_cycle` the
    /// panel is switched off for the duration.
    pub fn configure(
        &mut self,
        power_cycle: bool,
    ) -> Result<(), BusError> {
        self.bus.begin_transaction(I2C_ADDRESS, BUS_CLOCK_KHZ);
        for command in ssd1306::configuration(power_cycle).into_iter().flatten() {
            self.send(command);
        }
        self.bus.end_transaction().inspect_err(|err| {
            log_warn!("oled configuration failed: {}", err);
        })
    }

    pub fn set_contrast(
        &mut self,
        level: u8,
    ) -> Result<(), BusError> {
        self.transact(&[Command::Contrast(level)])
    }

    pub fn set_inverted(
        &mut self,
        inverted: bool,
    ) -> Result<(), BusError> {
        self.transact(&[Command::Invert(inverted)])
    }

    pub fn set_display_on(
        &mut self,
        on: bool,
    ) -> Result<(), BusError> {
        self.transact(&[Command::DisplayOn(on)])
    }

    /// Bring the panel up to date with `store`.
    ///
    /// A pending resync (after an earlier bus failure) overrides `mode`.
    pub fn sync(
        &mut self,
        store: &mut FrameStore,
        mode: SyncMode,
    ) -> SyncOutcome {
        let was_dirty = store.take_dirty();
        let mode = if self.resync_pending { SyncMode::Full } else { mode };

        let result = match mode {
            SyncMode::Full => {
                self.bus.begin_transaction(I2C_ADDRESS, BUS_CLOCK_KHZ);
                for page in 0..PAGES {
                    self.write_page(store.current(), page, PageSpan::FULL);
                }
                log_debug!("full sync: {} pages", PAGES);
                store.commit();
                self.bus.end_transaction()
            }
            SyncMode::Differential => {
                if !was_dirty {
                    return SyncOutcome::NothingToDo;
                }
                let spans: [Option<PageSpan>; PAGES] = core::array::from_fn(|page| {
                    diff_bounds(store.prior().page(page), store.current().page(page))
                });
                if spans.iter().all(Option::is_none) {
                    return SyncOutcome::NothingToDo;
                }

                self.bus.begin_transaction(I2C_ADDRESS, BUS_CLOCK_KHZ);
                let mut sent = 0;
                for (page, span) in spans.iter().enumerate() {
                    if let Some(span) = *span {
                        self.write_page(store.current(), page, span);
                        sent += span.width();
                    }
                }
                log_debug!("differential sync: {} bytes", sent);
                store.commit();
                self.bus.end_transaction()
            }
        };

        match result {
            Ok(()) => {
                self.resync_pending = false;
                SyncOutcome::FrameDrawn
            }
            Err(err) => {
                log_warn!("frame not drawn: {}, scheduling full resync", err);
                self.resync_pending = true;
                SyncOutcome::FrameNotDrawn(err)
            }
        }
    }

    fn transact(
        &mut self,
        commands: &[Command],
    ) -> Result<(), BusError> {
        self.bus.begin_transaction(I2C_ADDRESS, BUS_CLOCK_KHZ);
        for &command in commands {
            self.send(command);
        }
        self.bus.end_transaction()
    }

    fn send(
        &mut self,
        command: Command,
    ) {
        match command.encode() {
            Some(bytes) => self.bus.write_bytes(&bytes, WriteKind::Command),
            None => log_warn!("skipping out-of-range command {}", command),
        }
    }

    fn write_page(
        &mut self,
        frame: &Framebuffer,
        page: usize,
        span: PageSpan,
    ) {
        for command in ssd1306::page_address(page as u8, span.first as u8) {
            self.send(command);
        }
        let payload = &frame.page(page)[span.first..=span.last];
        let mut packet = [0u8; WIDTH + 1];
        packet[0] = CONTROL_DATA;
        packet[1..=payload.len()].copy_from_slice(payload);
        self.bus.write_bytes(&packet[..=payload.len()], WriteKind::Data);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
