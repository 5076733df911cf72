//! Value to presentation text.

use crate::escape::escape_into;
use crate::{Datum, InetAddr, ValueBox};

/// Format dates are printed with.
#[cfg(feature = "chrono-dates")]
pub const DATE_FORMAT: &str = "%b %e %Y %H:%M:%S %:z";

/// [`DATE_FORMAT`] as read back, after runs of whitespace are collapsed.
#[cfg(feature = "chrono-dates")]
pub(crate) const DATE_PARSE_FORMAT: &str = "%b %d %Y %H:%M:%S %:z";

const HEX: &[u8; 16] = b"0123456789abcdef";

fn push_hex(out: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        out.push(HEX[usize::from(b >> 4)]);
        out.push(HEX[usize::from(b & 0xf)]);
    }
}

fn push_int<I: itoa::Integer>(out: &mut Vec<u8>, v: I) {
    out.extend_from_slice(itoa::Buffer::new().format(v).as_bytes());
}

fn push_float<F: ryu::Float>(out: &mut Vec<u8>, v: F) {
    out.extend_from_slice(ryu::Buffer::new().format(v).as_bytes());
}

fn push_inet(out: &mut Vec<u8>, a: &InetAddr) {
    out.extend_from_slice(a.addr.to_string().as_bytes());
    if a.scope_id != 0 {
        out.push(b'%');
        push_int(out, a.scope_id);
    }
    if !a.is_host() {
        out.push(b'/');
        push_int(out, a.prefix);
    }
}

#[cfg(feature = "chrono-dates")]
fn push_date(out: &mut Vec<u8>, secs: u32) {
    use chrono::{Local, TimeZone};

    match Local.timestamp_opt(i64::from(secs), 0).earliest() {
        Some(when) => out.extend_from_slice(when.format(DATE_FORMAT).to_string().as_bytes()),
        None => push_int(out, secs),
    }
}

#[cfg(not(feature = "chrono-dates"))]
fn push_date(out: &mut Vec<u8>, secs: u32) {
    push_int(out, secs);
}

impl ValueBox {
    /// Render into `out`. Strings are wrapped in `quote` and escaped for it.
    fn render(&self, out: &mut Vec<u8>, quote: Option<u8>) {
        if let Some(alias) = self.alias() {
            out.extend_from_slice(alias.as_bytes());
            return;
        }
        match &self.datum {
            Datum::Str(b) => match quote {
                None => out.extend_from_slice(b.as_bytes()),
                Some(q) => {
                    out.push(q);
                    escape_into(out, b.as_bytes(), Some(q));
                    out.push(q);
                }
            },
            Datum::Octets(b) | Datum::Abinary(b) => {
                out.extend_from_slice(b"0x");
                push_hex(out, b.as_bytes());
            }
            Datum::Ipv4Addr(a) | Datum::Ipv4Prefix(a) | Datum::Ipv6Addr(a) | Datum::Ipv6Prefix(a) => {
                push_inet(out, a);
            }
            Datum::Ifid(v) => {
                for (i, pair) in v.chunks_exact(2).enumerate() {
                    if i > 0 {
                        out.push(b':');
                    }
                    out.extend_from_slice(format!("{:x}", u16::from_be_bytes([pair[0], pair[1]])).as_bytes());
                }
            }
            Datum::Ethernet(e) => {
                for (i, b) in e.iter().enumerate() {
                    if i > 0 {
                        out.push(b':');
                    }
                    push_hex(out, &[*b]);
                }
            }
            Datum::Bool(v) => out.extend_from_slice(if *v { b"yes" } else { b"no" }),
            Datum::Uint8(v) => push_int(out, *v),
            Datum::Uint16(v) => push_int(out, *v),
            Datum::Uint32(v) => push_int(out, *v),
            Datum::Uint64(v) => push_int(out, *v),
            Datum::Int8(v) => push_int(out, *v),
            Datum::Int16(v) => push_int(out, *v),
            Datum::Int32(v) => push_int(out, *v),
            Datum::Int64(v) => push_int(out, *v),
            Datum::Float32(v) => push_float(out, *v),
            Datum::Float64(v) => push_float(out, *v),
            Datum::Date(v) => push_date(out, *v),
            Datum::DateMilliseconds(v) | Datum::DateMicroseconds(v) | Datum::DateNanoseconds(v) => {
                push_int(out, *v);
            }
            Datum::Size(v) => push_int(out, *v),
            Datum::Timeval(t) => {
                push_int(out, t.sec);
                out.extend_from_slice(format!(".{:06}", t.usec).as_bytes());
            }
            Datum::Invalid => unreachable!("printing an invalid value box"),
        }
    }

    fn alias(&self) -> Option<String> {
        let table = self.enumv()?;
        table.lookup_value(self).map(str::to_owned)
    }

    pub(crate) fn print_bytes(&self, quote: Option<u8>) -> Vec<u8> {
        assert!(!self.is_invalid(), "printing an invalid value box");
        let mut out = Vec::new();
        self.render(&mut out, quote);
        out
    }

    /// Presentation text of the value.
    ///
    /// An attached alias table that knows the value wins over the type's own format. With a
    /// `quote`, strings are wrapped in it and escaped so that [`ValueBox::from_str`] with the
    /// same quote reads them back. Bytes that are not UTF-8 in an unquoted string are replaced.
    ///
    /// # Panics
    ///
    /// If the box is invalid.
    pub fn asprint(&self, quote: Option<u8>) -> String {
        match String::from_utf8(self.print_bytes(quote)) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    /// Print into `out`, always leaving it `\0` terminated (unless it is empty).
    ///
    /// Returns the length of the full text, so a return value `>= out.len()` means the output
    /// was truncated. Truncated quoted strings still end in their quote and never split an
    /// escape sequence; truncated octets only contain whole hex pairs.
    ///
    /// # Panics
    ///
    /// If the box is invalid.
    pub fn snprint(&self, out: &mut [u8], quote: Option<u8>) -> usize {
        let full = self.print_bytes(quote);
        let Some(budget) = out.len().checked_sub(1) else {
            return full.len();
        };
        if full.len() <= budget {
            out[..full.len()].copy_from_slice(&full);
            out[full.len()] = 0;
            return full.len();
        }

        let written = match (&self.datum, quote) {
            (Datum::Str(b), Some(q)) if budget >= 2 && self.alias().is_none() => {
                truncate_quoted(&mut out[..budget], b.as_bytes(), q)
            }
            (Datum::Octets(_) | Datum::Abinary(_), _) if budget >= 2 && self.alias().is_none() => {
                let n = 2 + (budget - 2) / 2 * 2;
                out[..n].copy_from_slice(&full[..n]);
                n
            }
            _ => {
                out[..budget].copy_from_slice(&full[..budget]);
                budget
            }
        };
        out[written] = 0;
        full.len()
    }
}

/// Write as much of the quoted, escaped `text` as fits, keeping room for the closing quote.
fn truncate_quoted(out: &mut [u8], text: &[u8], quote: u8) -> usize {
    let limit = out.len() - 1;
    out[0] = quote;
    let mut pos = 1;
    let mut unit = Vec::with_capacity(4);
    let mut emit = |unit: &[u8], pos: &mut usize| {
        if *pos + unit.len() > limit {
            return false;
        }
        out[*pos..*pos + unit.len()].copy_from_slice(unit);
        *pos += unit.len();
        true
    };
    'text: for chunk in text.utf8_chunks() {
        let mut buf = [0u8; 4];
        for ch in chunk.valid().chars() {
            unit.clear();
            escape_into(&mut unit, ch.encode_utf8(&mut buf).as_bytes(), Some(quote));
            if !emit(&unit, &mut pos) {
                break 'text;
            }
        }
        for &c in chunk.invalid() {
            unit.clear();
            escape_into(&mut unit, &[c], Some(quote));
            if !emit(&unit, &mut pos) {
                break 'text;
            }
        }
    }
    out[pos] = quote;
    pos + 1
}
