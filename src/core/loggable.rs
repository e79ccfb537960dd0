//! Text rendering for loggable values
//!
//! A value is loggable when it implements [`Loggable`]. The crate covers the
//! primitives (integers, floats, booleans, characters, strings); anything
//! implementing [`std::fmt::Display`] can be logged through [`Disp`], and user
//! types may implement [`Loggable`] directly to honour the active
//! [`FormatFlags`].
//!
//! Returning `Err` from [`Loggable::render`] marks a conversion failure: the
//! whole record that contained the value is discarded.

use super::format::{FloatStyle, FormatFlags, Radix};
use std::borrow::Cow;
use std::fmt::{self, Write};
use std::rc::Rc;
use std::sync::Arc;

/// A value with a defined textual rendering
///
/// # Example
///
/// ```
/// use rust_flog::{Loggable, RecordWriter};
/// use std::fmt::{self, Write};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Loggable for Point {
///     fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
///         w.write_str("(")?;
///         self.x.render(w)?;
///         w.write_str(", ")?;
///         self.y.render(w)?;
///         w.write_str(")")
///     }
/// }
/// ```
pub trait Loggable {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result;
}

/// Destination of one record's text, carrying the flags snapshot taken for
/// the current call
pub struct RecordWriter<'a> {
    buf: &'a mut String,
    flags: FormatFlags,
}

impl<'a> RecordWriter<'a> {
    pub fn new(buf: &'a mut String, flags: FormatFlags) -> Self {
        Self { buf, flags }
    }

    #[inline]
    pub fn flags(&self) -> FormatFlags {
        self.flags
    }

    /// Text rendered so far, including anything the buffer held beforehand
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    pub fn write_integer<T>(&mut self, value: T) -> fmt::Result
    where
        T: fmt::Display + fmt::LowerHex + fmt::UpperHex + fmt::Octal,
    {
        let f = self.flags;
        match (f.radix, f.show_base, f.uppercase) {
            (Radix::Decimal, ..) if f.show_pos => write!(self, "{:+}", value),
            (Radix::Decimal, ..) => write!(self, "{}", value),
            (Radix::Hex, true, true) => write!(self, "{:#X}", value),
            (Radix::Hex, true, false) => write!(self, "{:#x}", value),
            (Radix::Hex, false, true) => write!(self, "{:X}", value),
            (Radix::Hex, false, false) => write!(self, "{:x}", value),
            (Radix::Octal, true, _) => write!(self, "{:#o}", value),
            (Radix::Octal, false, _) => write!(self, "{:o}", value),
        }
    }

    pub fn write_float<T>(&mut self, value: T) -> fmt::Result
    where
        T: fmt::Display + fmt::LowerExp + fmt::UpperExp,
    {
        let f = self.flags;
        match (f.float_style, f.precision) {
            (FloatStyle::General, None) => {
                if f.show_pos {
                    write!(self, "{:+}", value)
                } else {
                    write!(self, "{}", value)
                }
            }
            (FloatStyle::General, Some(p)) | (FloatStyle::Fixed, Some(p)) => {
                self.write_fixed(value, usize::from(p))
            }
            (FloatStyle::Fixed, None) => self.write_fixed(value, 6),
            (FloatStyle::Scientific, p) => match (f.uppercase, f.show_pos, p) {
                (false, false, None) => write!(self, "{:e}", value),
                (false, true, None) => write!(self, "{:+e}", value),
                (true, false, None) => write!(self, "{:E}", value),
                (true, true, None) => write!(self, "{:+E}", value),
                (false, false, Some(p)) => write!(self, "{:.*e}", usize::from(p), value),
                (false, true, Some(p)) => write!(self, "{:+.*e}", usize::from(p), value),
                (true, false, Some(p)) => write!(self, "{:.*E}", usize::from(p), value),
                (true, true, Some(p)) => write!(self, "{:+.*E}", usize::from(p), value),
            },
        }
    }

    fn write_fixed<T: fmt::Display>(&mut self, value: T, precision: usize) -> fmt::Result {
        if self.flags.show_pos {
            write!(self, "{:+.*}", precision, value)
        } else {
            write!(self, "{:.*}", precision, value)
        }
    }
}

impl Write for RecordWriter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        self.buf.push(c);
        Ok(())
    }
}

macro_rules! impl_loggable_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Loggable for $t {
                #[inline]
                fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
                    w.write_integer(*self)
                }
            }
        )*
    };
}

impl_loggable_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Loggable for f32 {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_float(*self)
    }
}

impl Loggable for f64 {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_float(*self)
    }
}

impl Loggable for bool {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        let text = match (w.flags().bool_alpha, *self) {
            (true, true) => "true",
            (true, false) => "false",
            (false, true) => "1",
            (false, false) => "0",
        };
        w.write_str(text)
    }
}

impl Loggable for char {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_char(*self)
    }
}

impl Loggable for str {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_str(self)
    }
}

impl Loggable for String {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_str(self)
    }
}

impl Loggable for Cow<'_, str> {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_str(self)
    }
}

impl Loggable for fmt::Arguments<'_> {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_fmt(*self)
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        (**self).render(w)
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        (**self).render(w)
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        (**self).render(w)
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        (**self).render(w)
    }
}

/// Logs any [`fmt::Display`] value; flags are not applied
///
/// ```
/// use rust_flog::{flog_to, Disp, Logger, MemorySink};
/// use std::net::Ipv4Addr;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().output(sink.clone()).build();
/// flog_to!(logger; "peer ", Disp(Ipv4Addr::LOCALHOST));
/// logger.merge_local_to_global();
/// logger.flush_all().unwrap();
/// assert_eq!(sink.contents(), "peer 127.0.0.1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Disp<T>(pub T);

impl<T: fmt::Display> Loggable for Disp<T> {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        write!(w, "{}", self.0)
    }
}

/// Line terminator token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Newline;

impl Loggable for Newline {
    #[inline]
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_char('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_with(flags: FormatFlags, value: &dyn Loggable) -> String {
        let mut buf = String::new();
        let mut w = RecordWriter::new(&mut buf, flags);
        value.render(&mut w).expect("render");
        buf
    }

    #[test]
    fn test_default_rendering() {
        let flags = FormatFlags::default();
        assert_eq!(render_with(flags, &42i32), "42");
        assert_eq!(render_with(flags, &-7i64), "-7");
        assert_eq!(render_with(flags, &1.5f64), "1.5");
        assert_eq!(render_with(flags, &true), "1");
        assert_eq!(render_with(flags, &false), "0");
        assert_eq!(render_with(flags, &'x'), "x");
        assert_eq!(render_with(flags, &"text"), "text");
        assert_eq!(render_with(flags, &Newline), "\n");
    }

    #[test]
    fn test_integer_radix() {
        let hex = FormatFlags::default().with_radix(Radix::Hex);
        assert_eq!(render_with(hex, &255u32), "ff");
        assert_eq!(render_with(hex.with_uppercase(true), &255u32), "FF");
        assert_eq!(render_with(hex.with_show_base(true), &255u32), "0xff");
        assert_eq!(render_with(hex, &-1i8), "ff");

        let oct = FormatFlags::default().with_radix(Radix::Octal);
        assert_eq!(render_with(oct, &8u8), "10");
        assert_eq!(render_with(oct.with_show_base(true), &8u8), "0o10");
    }

    #[test]
    fn test_show_pos_applies_to_decimal_only() {
        let flags = FormatFlags::default().with_show_pos(true);
        assert_eq!(render_with(flags, &5i32), "+5");
        assert_eq!(render_with(flags, &-5i32), "-5");
        assert_eq!(render_with(flags.with_radix(Radix::Hex), &10u8), "a");
        assert_eq!(render_with(flags, &2.5f32), "+2.5");
    }

    #[test]
    fn test_float_styles() {
        let fixed = FormatFlags::default().with_float_style(FloatStyle::Fixed);
        assert_eq!(render_with(fixed, &1.5f64), "1.500000");
        assert_eq!(render_with(fixed.with_precision(Some(2)), &3.14159f64), "3.14");

        let sci = FormatFlags::default().with_float_style(FloatStyle::Scientific);
        assert_eq!(render_with(sci, &1500.0f64), "1.5e3");
        assert_eq!(render_with(sci.with_uppercase(true), &1500.0f64), "1.5E3");
        assert_eq!(render_with(sci.with_precision(Some(1)), &1500.0f64), "1.5e3");

        let general = FormatFlags::default().with_precision(Some(1));
        assert_eq!(render_with(general, &2.26f64), "2.3");
    }

    #[test]
    fn test_bool_alpha() {
        let flags = FormatFlags::default().with_bool_alpha(true);
        assert_eq!(render_with(flags, &true), "true");
        assert_eq!(render_with(flags, &false), "false");
    }

    #[test]
    fn test_smart_pointers_and_display() {
        let flags = FormatFlags::default();
        assert_eq!(render_with(flags, &Box::new(7u8)), "7");
        assert_eq!(render_with(flags, &Arc::<str>::from("shared")), "shared");
        assert_eq!(render_with(flags, &Cow::Borrowed("cow")), "cow");
        assert_eq!(render_with(flags, &Disp(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
        assert_eq!(render_with(flags, &format_args!("{}-{}", 1, 2)), "1-2");
    }

    #[test]
    fn test_writer_appends_to_existing_text() {
        let mut buf = String::from("prefix:");
        let mut w = RecordWriter::new(&mut buf, FormatFlags::default());
        10u16.render(&mut w).expect("render");
        assert_eq!(w.as_str(), "prefix:10");
    }
}
