//! Bus transaction primitive and the I2C implementation.
//!
//! The sync engine talks to the panel through [`Bus`]: a transaction is opened,
//! any number of raw writes follow, and only closing the transaction reports
//! whether the writes went through. That keeps the per-write path free of
//! error handling and lets tests substitute a recording bus.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// What a write carries. The control byte inside the write already tells the
/// controller; this is for the transport and for logging.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteKind {
    Command,
    Data,
}

/// Transport failure reported when a transaction ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The device did not acknowledge its address or a byte
    Nack,
    /// Another controller won arbitration
    ArbitrationLoss,
    /// Data arrived faster than it could be handled
    Overrun,
    /// Bus-level fault (misplaced start/stop)
    Bus,
    /// Any other transport failure
    Other,
}

impl fmt::Display for BusError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Nack => write!(f, "device did not acknowledge"),
            Self::ArbitrationLoss => write!(f, "bus arbitration lost"),
            Self::Overrun => write!(f, "bus overrun"),
            Self::Bus => write!(f, "bus error"),
            Self::Other => write!(f, "bus transfer failed"),
        }
    }
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Overrun => Self::Overrun,
            ErrorKind::Bus => Self::Bus,
            _ => Self::Other,
        }
    }
}

/// Scoped access to the panel's bus.
pub trait Bus {
    /// Open a transaction to `address` (7-bit). `clock_khz` is a rate hint
    /// the transport may ignore.
    fn begin_transaction(
        &mut self,
        address: u8,
        clock_khz: u32,
    );

    /// Queue or send one raw write. Failures surface at
    /// [`end_transaction`](Bus::end_transaction).
    fn write_bytes(
        &mut self,
        bytes: &[u8],
        kind: WriteKind,
    );

    /// Close the transaction, reporting the first failure since it opened.
    fn end_transaction(&mut self) -> Result<(), BusError>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn begin_transaction(
        &mut self,
        address: u8,
        clock_khz: u32,
    ) {
        (**self).begin_transaction(address, clock_khz);
    }

    fn write_bytes(
        &mut self,
        bytes: &[u8],
        kind: WriteKind,
    ) {
        (**self).write_bytes(bytes, kind);
    }

    fn end_transaction(&mut self) -> Result<(), BusError> { (**self).end_transaction() }
}

// =============================================================================
// I2C Transport
// =============================================================================

/// [`Bus`] over a blocking embedded-hal I2C controller.
///
/// Every write is its own I2C write (start, address, bytes, stop). Once one
/// fails, the rest of the transaction is skipped and the error is held for
/// `end_transaction`. The bus clock is fixed when the HAL peripheral is
/// built, so the clock hint is not used.
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
    error: Option<BusError>,
}

impl<I: I2c> I2cBus<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: 0,
            error: None,
        }
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> I { self.i2c }
}

impl<I: I2c> Bus for I2cBus<I> {
    fn begin_transaction(
        &mut self,
        address: u8,
        _clock_khz: u32,
    ) {
        self.address = address;
        self.error = None;
    }

    fn write_bytes(
        &mut self,
        bytes: &[u8],
        kind: WriteKind,
    ) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.i2c.write(self.address, bytes) {
            let err = BusError::from(err.kind());
            log_warn!("i2c {} write of {} bytes failed: {}", kind, bytes.len(), err);
            self.error = Some(err);
        }
    }

    fn end_transaction(&mut self) -> Result<(), BusError> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    use super::*;

    /// I2C controller that records writes and fails the `fail_at`th one.
    #[derive(Default)]
    struct FakeI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail_at: Option<(usize, ErrorKind)>,
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    if let Some((index, kind)) = self.fail_at {
                        if index == self.writes.len() {
                            self.fail_at = None;
                            return Err(kind);
                        }
                    }
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_writes_go_to_transaction_address() {
        let mut bus = I2cBus::new(FakeI2c::default());
        bus.begin_transaction(0x3C, 800);
        bus.write_bytes(&[0x00, 0xAF], WriteKind::Command);
        bus.write_bytes(&[0x40, 1, 2, 3], WriteKind::Data);
        assert_eq!(bus.end_transaction(), Ok(()));

        let i2c = bus.release();
        assert_eq!(i2c.writes, vec![(0x3C, vec![0x00, 0xAF]), (0x3C, vec![0x40, 1, 2, 3])]);
    }

    #[test]
    fn test_first_error_is_latched_until_end() {
        let fake = FakeI2c {
            fail_at: Some((1, ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))),
            ..Default::default()
        };
        let mut bus = I2cBus::new(fake);
        bus.begin_transaction(0x3C, 800);
        bus.write_bytes(&[0x00, 0xAE], WriteKind::Command);
        bus.write_bytes(&[0x00, 0xAF], WriteKind::Command);
        bus.write_bytes(&[0x40, 0xFF], WriteKind::Data);
        assert_eq!(bus.end_transaction(), Err(BusError::Nack));

        // Writes after the failure were dropped
        assert_eq!(bus.i2c.writes.len(), 1);

        // The next transaction starts clean
        bus.begin_transaction(0x3C, 800);
        bus.write_bytes(&[0x00, 0xA6], WriteKind::Command);
        assert_eq!(bus.end_transaction(), Ok(()));
        assert_eq!(bus.i2c.writes.len(), 2);
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(BusError::from(ErrorKind::ArbitrationLoss), BusError::ArbitrationLoss);
        assert_eq!(BusError::from(ErrorKind::Overrun), BusError::Overrun);
        assert_eq!(BusError::from(ErrorKind::Bus), BusError::Bus);
        assert_eq!(BusError::from(ErrorKind::Other), BusError::Other);
        assert_eq!(
            BusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            BusError::Nack
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(BusError::Nack.to_string(), "device did not acknowledge");
        assert_eq!(BusError::Other.to_string(), "bus transfer failed");
    }
}
