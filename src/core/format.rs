//! Process-wide format flags
//!
//! Every logging call takes one snapshot of the flags before rendering.
//! The flags are packed into a single atomic word so that a reader always
//! observes a complete value written by some earlier `store`, never a mix of
//! two writes, and so that the logging path takes no lock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Numeral base used for integers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Radix {
    #[default]
    Decimal,
    Hex,
    Octal,
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radix::Decimal => write!(f, "Decimal"),
            Radix::Hex => write!(f, "Hex"),
            Radix::Octal => write!(f, "Octal"),
        }
    }
}

/// Notation used for floating point values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatStyle {
    /// Shortest representation that round-trips, or `precision` decimals
    #[default]
    General,
    /// Fixed decimals; six when no precision is set
    Fixed,
    /// Exponent notation
    Scientific,
}

/// Formatting flags consulted by every logging call
///
/// Defaults mirror a freshly constructed diagnostic stream: decimal integers
/// without a base prefix, numeric booleans (`1`/`0`) and general floats.
///
/// # Example
///
/// ```
/// use rust_flog::{FormatFlags, Radix};
///
/// let flags = FormatFlags::default()
///     .with_radix(Radix::Hex)
///     .with_show_base(true)
///     .with_bool_alpha(true);
///
/// assert_eq!(flags.radix, Radix::Hex);
/// assert!(flags.bool_alpha);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatFlags {
    pub radix: Radix,
    /// Prefix hex and octal integers with `0x` / `0o`
    pub show_base: bool,
    /// Uppercase hex digits and exponent marker
    pub uppercase: bool,
    /// Print `+` for non-negative decimal numbers
    pub show_pos: bool,
    /// Spell booleans as `true`/`false` instead of `1`/`0`
    pub bool_alpha: bool,
    pub float_style: FloatStyle,
    pub precision: Option<u8>,
}

const RADIX_MASK: u32 = 0b11;
const SHOW_BASE: u32 = 1 << 2;
const UPPERCASE: u32 = 1 << 3;
const SHOW_POS: u32 = 1 << 4;
const BOOL_ALPHA: u32 = 1 << 5;
const FLOAT_SHIFT: u32 = 6;
const FLOAT_MASK: u32 = 0b11 << FLOAT_SHIFT;
const HAS_PRECISION: u32 = 1 << 8;
const PRECISION_SHIFT: u32 = 16;

impl FormatFlags {
    #[must_use]
    pub fn with_radix(mut self, radix: Radix) -> Self {
        self.radix = radix;
        self
    }

    #[must_use]
    pub fn with_show_base(mut self, show_base: bool) -> Self {
        self.show_base = show_base;
        self
    }

    #[must_use]
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    #[must_use]
    pub fn with_show_pos(mut self, show_pos: bool) -> Self {
        self.show_pos = show_pos;
        self
    }

    #[must_use]
    pub fn with_bool_alpha(mut self, bool_alpha: bool) -> Self {
        self.bool_alpha = bool_alpha;
        self
    }

    #[must_use]
    pub fn with_float_style(mut self, style: FloatStyle) -> Self {
        self.float_style = style;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Option<u8>) -> Self {
        self.precision = precision;
        self
    }

    pub fn to_bits(self) -> u32 {
        let mut bits = match self.radix {
            Radix::Decimal => 0,
            Radix::Hex => 1,
            Radix::Octal => 2,
        };
        if self.show_base {
            bits |= SHOW_BASE;
        }
        if self.uppercase {
            bits |= UPPERCASE;
        }
        if self.show_pos {
            bits |= SHOW_POS;
        }
        if self.bool_alpha {
            bits |= BOOL_ALPHA;
        }
        bits |= match self.float_style {
            FloatStyle::General => 0,
            FloatStyle::Fixed => 1,
            FloatStyle::Scientific => 2,
        } << FLOAT_SHIFT;
        if let Some(p) = self.precision {
            bits |= HAS_PRECISION | (u32::from(p) << PRECISION_SHIFT);
        }
        bits
    }

    pub fn from_bits(bits: u32) -> Self {
        let radix = match bits & RADIX_MASK {
            1 => Radix::Hex,
            2 => Radix::Octal,
            _ => Radix::Decimal,
        };
        let float_style = match (bits & FLOAT_MASK) >> FLOAT_SHIFT {
            1 => FloatStyle::Fixed,
            2 => FloatStyle::Scientific,
            _ => FloatStyle::General,
        };
        let precision = if bits & HAS_PRECISION != 0 {
            Some(((bits >> PRECISION_SHIFT) & 0xff) as u8)
        } else {
            None
        };
        Self {
            radix,
            show_base: bits & SHOW_BASE != 0,
            uppercase: bits & UPPERCASE != 0,
            show_pos: bits & SHOW_POS != 0,
            bool_alpha: bits & BOOL_ALPHA != 0,
            float_style,
            precision,
        }
    }
}

/// Atomically replaced [`FormatFlags`], last writer wins
#[derive(Debug, Default)]
pub struct SharedFormat {
    bits: AtomicU32,
}

impl SharedFormat {
    pub fn new(flags: FormatFlags) -> Self {
        Self {
            bits: AtomicU32::new(flags.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self) -> FormatFlags {
        FormatFlags::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, flags: FormatFlags) {
        self.bits.store(flags.to_bits(), Ordering::Relaxed);
    }

    /// Read-modify-write without losing a concurrent `store`
    pub fn update<F>(&self, mut f: F) -> FormatFlags
    where
        F: FnMut(FormatFlags) -> FormatFlags,
    {
        let previous = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some(f(FormatFlags::from_bits(bits)).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        FormatFlags::from_bits(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let flags = FormatFlags::default();
        assert_eq!(flags.radix, Radix::Decimal);
        assert!(!flags.bool_alpha);
        assert_eq!(flags.float_style, FloatStyle::General);
        assert_eq!(flags.precision, None);
        assert_eq!(flags.to_bits(), 0);
    }

    #[test]
    fn test_bits_keep_every_field() {
        let flags = FormatFlags::default()
            .with_radix(Radix::Octal)
            .with_show_base(true)
            .with_uppercase(true)
            .with_show_pos(true)
            .with_bool_alpha(true)
            .with_float_style(FloatStyle::Scientific)
            .with_precision(Some(255));
        assert_eq!(FormatFlags::from_bits(flags.to_bits()), flags);

        // Precision zero is distinct from no precision
        let zero = FormatFlags::default().with_precision(Some(0));
        assert_eq!(FormatFlags::from_bits(zero.to_bits()).precision, Some(0));
    }

    #[test]
    fn test_shared_store_and_update() {
        let shared = SharedFormat::new(FormatFlags::default());
        shared.store(FormatFlags::default().with_radix(Radix::Hex));
        assert_eq!(shared.load().radix, Radix::Hex);

        let previous = shared.update(|f| f.with_bool_alpha(true));
        assert!(!previous.bool_alpha);
        assert!(shared.load().bool_alpha);
        assert_eq!(shared.load().radix, Radix::Hex);
    }

    #[test]
    fn test_flags_serialize_field_names() {
        let flags = FormatFlags::default().with_radix(Radix::Hex);
        let json = serde_json::to_string(&flags).expect("serialize flags");
        assert!(json.contains("\"radix\":\"Hex\""));
        assert!(json.contains("\"precision\":null"));
    }

    #[test]
    fn test_radix_display() {
        assert_eq!(Radix::Decimal.to_string(), "Decimal");
        assert_eq!(Radix::Hex.to_string(), "Hex");
        assert_eq!(Radix::Octal.to_string(), "Octal");
    }
}
