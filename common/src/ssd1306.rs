//! SSD1306 command encoding.
//!
//! Each command goes out as its own bus write, prefixed with the command
//! control byte. Parameters outside the controller's documented range make
//! [`Command::encode`] return `None`; such a command is dropped rather than
//! sent malformed.

use heapless::Vec;

use crate::config::HEIGHT;

/// Control byte announcing one command and its parameters.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing GDDRAM data for the rest of the write.
pub const CONTROL_DATA: u8 = 0x40;

/// Encoded command: control byte, opcode and up to two parameters.
pub type CommandBytes = Vec<u8, 4>;

// =============================================================================
// Opcodes
// =============================================================================

const MEMORY_MODE: u8 = 0x20;
const COLUMN_ADDR: u8 = 0x21;
const PAGE_ADDR: u8 = 0x22;
const DEACTIVATE_SCROLL: u8 = 0x2E;
const ACTIVATE_SCROLL: u8 = 0x2F;
const START_LINE: u8 = 0x40;
const SET_CONTRAST: u8 = 0x81;
const CHARGE_PUMP: u8 = 0x8D;
const SEGMENT_REMAP: u8 = 0xA0;
const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;
const ENTIRE_DISPLAY_ON: u8 = 0xA5;
const NORMAL_DISPLAY: u8 = 0xA6;
const INVERT_DISPLAY: u8 = 0xA7;
const SET_MULTIPLEX: u8 = 0xA8;
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const PAGE_START: u8 = 0xB0;
const COM_SCAN_INC: u8 = 0xC0;
const COM_SCAN_DEC: u8 = 0xC8;
const DISPLAY_OFFSET: u8 = 0xD3;
const CLOCK_DIVIDE: u8 = 0xD5;
const PRECHARGE: u8 = 0xD9;
const COM_PINS: u8 = 0xDA;
const VCOMH_DESELECT: u8 = 0xDB;
const LOWER_COLUMN: u8 = 0x00;
const UPPER_COLUMN: u8 = 0x10;

/// Contrast the controller resets to.
pub const DEFAULT_CONTRAST: u8 = 0x7F;

// =============================================================================
// Parameter Types
// =============================================================================

/// How the GDDRAM address pointer advances after each data byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressingMode {
    Horizontal = 0x00,
    Vertical = 0x01,
    Page = 0x02,
}

/// COM deselect voltage as a fraction of Vcc.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VcomhLevel {
    Vcc065 = 0x00,
    Vcc077 = 0x20,
    Vcc083 = 0x30,
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Panel on (`true`) or sleep.
    DisplayOn(bool),
    /// One of 256 contrast steps.
    Contrast(u8),
    /// Light every pixel regardless of GDDRAM (`true`) or follow it.
    EntireDisplayOn(bool),
    /// Invert the lit state of every pixel.
    Invert(bool),
    /// Start or stop the configured scroll.
    Scroll(bool),
    AddressingMode(AddressingMode),
    /// Column window for horizontal/vertical addressing, each end <= 127.
    ColumnRange { start: u8, end: u8 },
    /// Page window for horizontal/vertical addressing, each end <= 7.
    PageRange { start: u8, end: u8 },
    /// RAM row shown on the top line, <= 63.
    StartLine(u8),
    /// Map column 127 to SEG0 (`true`) instead of column 0.
    SegmentRemap(bool),
    /// Multiplex ratio minus one, 15..=63.
    Multiplex(u8),
    /// Scan COM0 to COM[N-1] (`true`) or the reverse.
    ComScanIncrement(bool),
    /// Vertical shift by COM, <= 63.
    DisplayOffset(u8),
    ComPins { sequential: bool, remap: bool },
    /// Divide ratio minus one and oscillator frequency, each <= 15.
    ClockDivide { ratio: u8, oscillator: u8 },
    /// Pre-charge phase lengths in DCLKs, each <= 15.
    Precharge { phase1: u8, phase2: u8 },
    VcomhDeselect(VcomhLevel),
    ChargePump(bool),
    /// Page pointer in page addressing mode, <= 7.
    PageStart(u8),
    /// Low nibble of the column pointer in page addressing mode, <= 15.
    LowerColumn(u8),
    /// High nibble of the column pointer in page addressing mode, <= 15.
    UpperColumn(u8),
}

fn frame(body: &[u8]) -> Option<CommandBytes> {
    let mut bytes = CommandBytes::new();
    bytes.push(CONTROL_COMMAND).ok()?;
    bytes.extend_from_slice(body).ok()?;
    Some(bytes)
}

impl Command {
    /// Bytes for one bus write, or `None` if a parameter is out of range.
    pub fn encode(self) -> Option<CommandBytes> {
        match self {
            Self::DisplayOn(on) => frame(&[if on { DISPLAY_ON } else { DISPLAY_OFF }]),
            Self::Contrast(level) => frame(&[SET_CONTRAST, level]),
            Self::EntireDisplayOn(on) => {
                frame(&[if on { ENTIRE_DISPLAY_ON } else { ENTIRE_DISPLAY_RESUME }])
            }
            Self::Invert(on) => frame(&[if on { INVERT_DISPLAY } else { NORMAL_DISPLAY }]),
            Self::Scroll(on) => frame(&[if on { ACTIVATE_SCROLL } else { DEACTIVATE_SCROLL }]),
            Self::AddressingMode(mode) => frame(&[MEMORY_MODE, mode as u8]),
            Self::ColumnRange { start, end } if start <= 127 && end <= 127 => {
                frame(&[COLUMN_ADDR, start, end])
            }
            Self::PageRange { start, end } if start <= 7 && end <= 7 => {
                frame(&[PAGE_ADDR, start, end])
            }
            Self::StartLine(line) if line <= 63 => frame(&[START_LINE | line]),
            Self::SegmentRemap(remap) => frame(&[SEGMENT_REMAP | u8::from(remap)]),
            Self::Multiplex(ratio) if (15..=63).contains(&ratio) => frame(&[SET_MULTIPLEX, ratio]),
            Self::ComScanIncrement(inc) => frame(&[if inc { COM_SCAN_INC } else { COM_SCAN_DEC }]),
            Self::DisplayOffset(offset) if offset <= 63 => frame(&[DISPLAY_OFFSET, offset]),
            Self::ComPins { sequential, remap } => {
                let mut config = 0x02;
                if !sequential {
                    config |= 0x10;
                }
                if remap {
                    config |= 0x20;
                }
                frame(&[COM_PINS, config])
            }
            Self::ClockDivide { ratio, oscillator } if ratio <= 15 && oscillator <= 15 => {
                frame(&[CLOCK_DIVIDE, ratio | (oscillator << 4)])
            }
            Self::Precharge { phase1, phase2 } if phase1 <= 15 && phase2 <= 15 => {
                frame(&[PRECHARGE, phase1 | (phase2 << 4)])
            }
            Self::VcomhDeselect(level) => frame(&[VCOMH_DESELECT, level as u8]),
            Self::ChargePump(enable) => frame(&[CHARGE_PUMP, if enable { 0x14 } else { 0x10 }]),
            Self::PageStart(page) if page <= 7 => frame(&[PAGE_START + page]),
            Self::LowerColumn(nibble) if nibble <= 15 => frame(&[LOWER_COLUMN + nibble]),
            Self::UpperColumn(nibble) if nibble <= 15 => frame(&[UPPER_COLUMN + nibble]),
            _ => None,
        }
    }
}

// =============================================================================
// Sequences
// =============================================================================

/// Number of entries in [`configuration`].
pub const CONFIGURATION_LEN: usize = 17;

/// Register setup for this panel's wiring, in order.
///
/// With `power_cycle` the panel is switched off first and back on at the end,
/// and the entire-display override is cleared. Entries skipped without a
/// power cycle are `None`.
pub fn configuration(power_cycle: bool) -> [Option<Command>; CONFIGURATION_LEN] {
    let when_cycling = |command| if power_cycle { Some(command) } else { None };
    [
        when_cycling(Command::DisplayOn(false)),
        Some(Command::Multiplex(HEIGHT as u8 - 1)),
        Some(Command::DisplayOffset(0)),
        Some(Command::StartLine(0)),
        Some(Command::AddressingMode(AddressingMode::Page)),
        Some(Command::SegmentRemap(true)),
        Some(Command::ComScanIncrement(false)),
        Some(Command::ComPins { sequential: true, remap: false }),
        Some(Command::Contrast(DEFAULT_CONTRAST)),
        Some(Command::Precharge { phase1: 1, phase2: 15 }),
        Some(Command::VcomhDeselect(VcomhLevel::Vcc077)),
        when_cycling(Command::EntireDisplayOn(false)),
        Some(Command::Invert(false)),
        Some(Command::ClockDivide { ratio: 0, oscillator: 8 }),
        Some(Command::ChargePump(true)),
        Some(Command::Scroll(false)),
        when_cycling(Command::DisplayOn(true)),
    ]
}

/// Point the page-mode write pointer at `column` of `page`.
pub const fn page_address(
    page: u8,
    column: u8,
) -> [Command; 3] {
    [
        Command::PageStart(page),
        Command::LowerColumn(column & 0x0F),
        Command::UpperColumn(column >> 4),
    ]
}
