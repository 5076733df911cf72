//! Presentation text to value.
//!
//! [`ValueBox::from_str`] is the inverse of [`ValueBox::asprint`]. Only strings (and alias
//! lookups) honour the quote character; every other type is parsed from the raw text.

use core::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cast::integer_datum;
use crate::escape::unescape;
use crate::{strerror, Buf, Datum, EnumTable, FrType, InetAddr, Timeval, ValueBox, ValueErr};

macro_rules! fail {
    ($($arg:tt)*) => {
        ValueErr::ParseError(format!($($arg)*))
    };
}

/// Inclusive range accepted for an integer type.
fn integer_bounds(ty: FrType) -> (i128, i128) {
    match ty {
        FrType::Uint8 => (0, u8::MAX.into()),
        FrType::Uint16 => (0, u16::MAX.into()),
        FrType::Uint32 => (0, u32::MAX.into()),
        FrType::Int8 => (i8::MIN.into(), i8::MAX.into()),
        FrType::Int16 => (i16::MIN.into(), i16::MAX.into()),
        FrType::Int32 => (i32::MIN.into(), i32::MAX.into()),
        FrType::Int64 => (i64::MIN.into(), i64::MAX.into()),
        _ => (0, u64::MAX.into()),
    }
}

/// Decimal or `0x` hex, with an optional sign.
fn parse_integer(text: &str) -> Option<i128> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|c| c.is_ascii_hexdigit()) => {
            i128::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !body.is_empty() && body.bytes().all(|c| c.is_ascii_digit()) => body.parse::<i128>().ok()?,
        None => return None,
    };
    Some(if negative { -value } else { value })
}

fn integer(text: &str, ty: FrType) -> Result<Datum, ValueErr> {
    let value = parse_integer(text).ok_or_else(|| fail!("Invalid integer value \"{text}\""))?;
    let (min, max) = integer_bounds(ty);
    if value < min || value > max {
        return Err(ValueErr::OutOfRange { value, ty, min, max });
    }
    integer_datum(ty, value).ok_or(ValueErr::OutOfRange { value, ty, min, max })
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

fn all_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_hexdigit())
}

/// Dotted quad with trailing octets optional (`10`, `10.1`, `10.1.2`).
fn abbreviated_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    for (n, part) in s.split('.').enumerate() {
        if n == 4 || part.len() > 3 || !all_digits(part) {
            return None;
        }
        octets[n] = part.parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

fn mask_length(mask: &str, max: u8, family: &str) -> Result<u8, ValueErr> {
    mask.parse::<u8>()
        .ok()
        .filter(|p| all_digits(mask) && *p <= max)
        .ok_or_else(|| fail!("Invalid {family} mask length \"/{mask}\".  Should be between 0-{max}"))
}

/// IPv4 address or prefix: `*`, a host order integer, a dotted quad, or `addr/len`.
///
/// With a prefix length the address may be abbreviated and host bits are cleared.
pub(crate) fn parse_ipv4(text: &str) -> Result<InetAddr, ValueErr> {
    let bad = || fail!("Failed to parse IPv4 address string \"{text}\"");
    let (addr_part, mask) = match text.split_once('/') {
        Some((a, m)) => (a, Some(m)),
        None => (text, None),
    };
    let prefix = match mask {
        Some(m) => mask_length(m, 32, "IPv4")?,
        None => 32,
    };
    let addr = if addr_part == "*" {
        Ipv4Addr::UNSPECIFIED
    } else if mask.is_some() {
        abbreviated_ipv4(addr_part).ok_or_else(bad)?
    } else if all_digits(addr_part) {
        addr_part.parse::<u32>().map(Ipv4Addr::from).map_err(|_| bad())?
    } else {
        addr_part.parse::<Ipv4Addr>().map_err(|_| bad())?
    };
    Ok(InetAddr::v4(addr, prefix).masked())
}

/// IPv6 address or prefix: `*`, `addr`, `addr%scope`, optionally followed by `/len`.
pub(crate) fn parse_ipv6(text: &str) -> Result<InetAddr, ValueErr> {
    let bad = || fail!("Failed to parse IPv6 address string \"{text}\"");
    let (rest, mask) = match text.split_once('/') {
        Some((a, m)) => (a, Some(m)),
        None => (text, None),
    };
    let prefix = match mask {
        Some(m) => mask_length(m, 128, "IPv6")?,
        None => 128,
    };
    let (addr_part, scope_id) = match rest.split_once('%') {
        Some((a, s)) if all_digits(s) => (a, s.parse::<u32>().map_err(|_| bad())?),
        Some(_) => return Err(bad()),
        None => (rest, 0),
    };
    let addr = if addr_part == "*" {
        Ipv6Addr::UNSPECIFIED
    } else {
        addr_part.parse::<Ipv6Addr>().map_err(|_| bad())?
    };
    Ok(InetAddr::v6(addr, prefix, scope_id).masked())
}

fn host_only(inet: InetAddr) -> Result<InetAddr, ValueErr> {
    if inet.is_host() {
        return Ok(inet);
    }
    let (family, full) = if inet.max_prefix() == 32 { ("IPv4", 32) } else { ("IPv6", 128) };
    Err(fail!(
        "Invalid {family} mask length \"/{}\".  Only \"/{full}\" permitted for non-prefix types",
        inet.prefix
    ))
}

/// `00:11:22:33:44:55`, `0011.2233.4455`, or an integer holding the address in its low 48 bits.
fn parse_ethernet(text: &str) -> Result<[u8; 6], ValueErr> {
    let bad = || fail!("failed to parse Ethernet address \"{text}\"");
    let mut ether = [0u8; 6];
    if all_digits(text) {
        let bytes = text.parse::<u64>().map_err(|_| bad())?.to_be_bytes();
        if bytes[..2] != [0, 0] {
            return Err(bad());
        }
        ether.copy_from_slice(&bytes[2..]);
        return Ok(ether);
    }

    let (sep, width, groups) = if text.contains('.') { ('.', 4, 3) } else { (':', 2, 6) };
    let mut n = 0;
    for group in text.split(sep) {
        let ok = if sep == '.' { group.len() == width } else { group.len() <= width };
        if n == groups || !ok || !all_hex(group) {
            return Err(bad());
        }
        let v = u16::from_str_radix(group, 16).map_err(|_| bad())?;
        if sep == '.' {
            ether[n * 2..n * 2 + 2].copy_from_slice(&v.to_be_bytes());
        } else {
            ether[n] = v as u8;
        }
        n += 1;
    }
    if n != groups {
        return Err(bad());
    }
    Ok(ether)
}

/// Four colon separated groups of up to four hex digits.
fn parse_ifid(text: &str) -> Result<[u8; 8], ValueErr> {
    let bad = || fail!("Failed to parse interface-id string \"{text}\"");
    let mut ifid = [0u8; 8];
    let mut n = 0;
    for group in text.split(':') {
        if n == 4 || group.len() > 4 || !all_hex(group) {
            return Err(bad());
        }
        let v = u16::from_str_radix(group, 16).map_err(|_| bad())?;
        ifid[n * 2..n * 2 + 2].copy_from_slice(&v.to_be_bytes());
        n += 1;
    }
    if n != 4 {
        return Err(bad());
    }
    Ok(ifid)
}

fn parse_hex(text: &[u8]) -> Result<Vec<u8>, ValueErr> {
    let digits = &text[2..];
    if digits.len() % 2 != 0 {
        return Err(fail!("Length of Hex String is not even, got {} uint8s", digits.len()));
    }
    let mut out = Vec::new();
    out.try_reserve_exact(digits.len() / 2)?;
    for pair in digits.chunks_exact(2) {
        let hi = char::from(pair[0]).to_digit(16);
        let lo = char::from(pair[1]).to_digit(16);
        match (hi, lo) {
            (Some(hi), Some(lo)) => out.push(((hi << 4) | lo) as u8),
            _ => return Err(fail!("Invalid hex data")),
        }
    }
    Ok(out)
}

fn has_hex_prefix(input: &[u8]) -> bool {
    input.len() >= 2 && input[..2].eq_ignore_ascii_case(b"0x")
}

/// `sec[.fraction]`. Fractions past microseconds are dropped.
fn parse_timeval(text: &str) -> Result<Timeval, ValueErr> {
    let bad = || fail!("Failed parsing \"{text}\" as a timeval");
    let (sec, frac) = match text.split_once('.') {
        Some((s, f)) if all_digits(f) => (s, f),
        Some(_) => return Err(bad()),
        None => (text, ""),
    };
    let digits = sec.strip_prefix('-').unwrap_or(sec);
    if !all_digits(digits) {
        return Err(bad());
    }
    let sec = sec.parse::<i64>().map_err(|_| bad())?;
    let mut usec = 0u32;
    for i in 0..6 {
        let d = frac.as_bytes().get(i).map_or(0, |c| u32::from(c - b'0'));
        usec = usec * 10 + d;
    }
    Ok(Timeval { sec, usec })
}

#[cfg(feature = "chrono-dates")]
fn parse_date(text: &str) -> Option<u32> {
    use chrono::DateTime;

    if all_digits(text) {
        return text.parse().ok();
    }
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let when = DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| DateTime::parse_from_str(&normalized, crate::print::DATE_PARSE_FORMAT))
        .ok()?;
    u32::try_from(when.timestamp()).ok()
}

#[cfg(not(feature = "chrono-dates"))]
fn parse_date(text: &str) -> Option<u32> {
    if all_digits(text) { text.parse().ok() } else { None }
}

impl ValueBox {
    /// Parse presentation text into a value of `*dst_type`.
    ///
    /// With `dst_enumv`, the (unescaped) text is first looked up as an alias and a hit yields a
    /// copy of the aliased value. `combo-ip` and `combo-prefix` resolve to a concrete family and
    /// `*dst_type` is rewritten to it.
    ///
    /// | Type | Accepted text |
    /// |------|---------------|
    /// | `string` | anything, unescaped according to `quote` |
    /// | `octets` | `0x` followed by hex pairs, otherwise the bytes verbatim |
    /// | integers | decimal or `0x` hex, range checked |
    /// | `ipaddr`, `ipv4prefix` | `*`, integer, dotted quad, `addr/len` (abbreviated with a length) |
    /// | `ipv6addr`, `ipv6prefix` | `*`, `addr[%scope][/len]` |
    /// | `ether` | `aa:bb:cc:dd:ee:ff`, `aabb.ccdd.eeff`, integer |
    /// | `bool` | `yes`, `true`, `no`, `false` |
    /// | `date` | epoch seconds, RFC 3339, or the printed form |
    /// | `timeval` | `sec[.fraction]` |
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::ParseError`] | Malformed text, the message quotes it |
    /// | [`ValueErr::OutOfRange`] | Integer does not fit the type |
    /// | [`ValueErr::UnsupportedType`] | Structural types have no text form |
    /// | [`ValueErr::Utf8ConversionError`] | Non UTF-8 text for a non-string type |
    ///
    /// # Panics
    ///
    /// If `*dst_type` is [`FrType::Invalid`].
    pub fn from_str(
        dst_type: &mut FrType,
        dst_enumv: Option<&Arc<EnumTable>>,
        input: &[u8],
        quote: Option<u8>,
        tainted: bool,
    ) -> Result<ValueBox, ValueErr> {
        assert!(*dst_type != FrType::Invalid, "parse into the invalid type");
        strerror::track(parse_inner(dst_type, dst_enumv, input, quote, tainted))
    }
}

fn alias_lookup(table: &EnumTable, input: &[u8], quote: Option<u8>) -> Option<ValueBox> {
    let alias = unescape(input, quote);
    if !EnumTable::valid_name(&alias) {
        return None;
    }
    let alias = core::str::from_utf8(&alias).ok()?;
    table.lookup_alias(alias).cloned()
}

fn parse_inner(
    dst_type: &mut FrType,
    dst_enumv: Option<&Arc<EnumTable>>,
    input: &[u8],
    quote: Option<u8>,
    tainted: bool,
) -> Result<ValueBox, ValueErr> {
    if let Some(table) = dst_enumv {
        if let Some(found) = alias_lookup(table, input, quote) {
            let mut value = found.copy()?;
            value.tainted = tainted;
            value.set_enumv(Some(table));
            return Ok(value);
        }
    }
    trace!(ty = %dst_type, len = input.len(), "parse");

    let datum = match *dst_type {
        FrType::String => {
            let mut text = unescape(input, quote);
            text.push(0);
            Datum::Str(Buf::transfer_str(text)?)
        }
        FrType::Octets if has_hex_prefix(input) => Datum::Octets(Buf::transfer(parse_hex(input)?)),
        FrType::Octets => Datum::Octets(Buf::duplicate(input)?),
        FrType::Abinary if has_hex_prefix(input) => Datum::Abinary(Buf::transfer(parse_hex(input)?)),
        FrType::Abinary => return Err(fail!("Ascend filters must be given as hex")),
        FrType::Vsa => return Err(fail!("Must use 'Attr-26 = ...' instead of 'Vendor-Specific = ...'")),
        ty if ty.is_structural() => return Err(ValueErr::UnsupportedType { op: "parse", ty }),
        ty => {
            let text = core::str::from_utf8(input)?;
            let datum = parse_fixed(ty, text)?;
            if let Some(inet) = datum.inet() {
                debug!(%ty, resolved = %datum.ty(), prefix = inet.prefix, "parsed address");
            }
            *dst_type = datum.ty();
            datum
        }
    };
    Ok(ValueBox::with_meta(datum, tainted, dst_enumv))
}

fn parse_fixed(ty: FrType, text: &str) -> Result<Datum, ValueErr> {
    Ok(match ty {
        FrType::Uint8
        | FrType::Uint16
        | FrType::Uint32
        | FrType::Uint64
        | FrType::Int8
        | FrType::Int16
        | FrType::Int32
        | FrType::Int64
        | FrType::DateMilliseconds
        | FrType::DateMicroseconds
        | FrType::DateNanoseconds => integer(text, ty)?,

        FrType::Ipv4Addr => Datum::Ipv4Addr(host_only(parse_ipv4(text)?)?),
        FrType::Ipv4Prefix => Datum::Ipv4Prefix(parse_ipv4(text)?),
        FrType::Ipv6Addr => Datum::Ipv6Addr(host_only(parse_ipv6(text)?)?),
        FrType::Ipv6Prefix => Datum::Ipv6Prefix(parse_ipv6(text)?),
        FrType::ComboIpAddr if text.contains(':') => Datum::Ipv6Addr(host_only(parse_ipv6(text)?)?),
        FrType::ComboIpAddr => Datum::Ipv4Addr(host_only(parse_ipv4(text)?)?),
        FrType::ComboIpPrefix if text.contains(':') => Datum::Ipv6Prefix(parse_ipv6(text)?),
        FrType::ComboIpPrefix => Datum::Ipv4Prefix(parse_ipv4(text)?),

        FrType::Ifid => Datum::Ifid(parse_ifid(text)?),
        FrType::Ethernet => Datum::Ethernet(parse_ethernet(text)?),
        FrType::Bool => match text {
            "yes" | "true" => Datum::Bool(true),
            "no" | "false" => Datum::Bool(false),
            _ => return Err(fail!("\"{text}\" is not a valid boolean value")),
        },
        FrType::Float32 => {
            Datum::Float32(text.parse().map_err(|_| fail!("Failed parsing \"{text}\" as a float32"))?)
        }
        FrType::Float64 => {
            Datum::Float64(text.parse().map_err(|_| fail!("Failed parsing \"{text}\" as a float64"))?)
        }
        FrType::Size => {
            Datum::Size(text.parse().map_err(|_| fail!("Failed parsing \"{text}\" as a file or memory size"))?)
        }
        FrType::Date => {
            Datum::Date(parse_date(text).ok_or_else(|| fail!("failed to parse time string \"{text}\""))?)
        }
        FrType::Timeval => Datum::Timeval(parse_timeval(text)?),

        FrType::Invalid
        | FrType::String
        | FrType::Octets
        | FrType::Abinary
        | FrType::Tlv
        | FrType::Struct
        | FrType::Extended
        | FrType::LongExtended
        | FrType::Evs
        | FrType::Vsa
        | FrType::Vendor => return Err(ValueErr::UnsupportedType { op: "parse", ty }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::net::IpAddr;

    fn parse(ty: FrType, text: &str) -> Result<ValueBox, ValueErr> {
        let mut ty = ty;
        ValueBox::from_str(&mut ty, None, text.as_bytes(), None, false)
    }

    fn inet(b: &ValueBox) -> InetAddr {
        *b.datum().inet().unwrap()
    }

    #[test]
    fn integers() {
        assert_eq!(parse(FrType::Uint8, "255").unwrap(), ValueBox::new(Datum::Uint8(255)));
        assert_eq!(parse(FrType::Uint16, "0x1f").unwrap(), ValueBox::new(Datum::Uint16(31)));
        assert_eq!(parse(FrType::Int8, "-128").unwrap(), ValueBox::new(Datum::Int8(-128)));
        assert_eq!(parse(FrType::Uint64, "18446744073709551615").unwrap(), ValueBox::new(Datum::Uint64(u64::MAX)));
        assert_eq!(parse(FrType::DateNanoseconds, "17").unwrap(), ValueBox::new(Datum::DateNanoseconds(17)));

        let err = parse(FrType::Uint8, "300").unwrap_err();
        assert_eq!(err.to_string(), "Value 300 is invalid for type uint8 (must be in range 0-255)");
        assert_eq!(strerror::last_error().as_deref(), Some("Value 300 is invalid for type uint8 (must be in range 0-255)"));
        let err = parse(FrType::Int16, "-40000").unwrap_err();
        assert_eq!(err.to_string(), "Value -40000 is invalid for type int16 (must be in range -32768-32767)");
        assert!(matches!(parse(FrType::Uint32, "-1"), Err(ValueErr::OutOfRange { .. })));
        assert_eq!(parse(FrType::Uint32, "12ab").unwrap_err().to_string(), "Invalid integer value \"12ab\"");
        assert!(parse(FrType::Uint32, "").is_err());
        assert!(parse(FrType::Uint32, "0x").is_err());
    }

    #[test]
    fn ipv4_forms() {
        let a = parse(FrType::Ipv4Addr, "192.0.2.1").unwrap();
        assert_eq!(inet(&a).addr, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(inet(&parse(FrType::Ipv4Addr, "192.0.2.1/32").unwrap()).prefix, 32);
        assert_eq!(inet(&parse(FrType::Ipv4Addr, "*").unwrap()).addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(inet(&parse(FrType::Ipv4Addr, "167772161").unwrap()).addr, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

        let err = parse(FrType::Ipv4Addr, "10.0.0.0/8").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid IPv4 mask length \"/8\".  Only \"/32\" permitted for non-prefix types"
        );

        let p = parse(FrType::Ipv4Prefix, "10.1.2.3/8").unwrap();
        assert_eq!(inet(&p), InetAddr::v4(Ipv4Addr::new(10, 0, 0, 0), 8));
        let short = parse(FrType::Ipv4Prefix, "172.16/12").unwrap();
        assert_eq!(inet(&short), InetAddr::v4(Ipv4Addr::new(172, 16, 0, 0), 12));
        assert!(parse(FrType::Ipv4Prefix, "10.0.0.0/33").is_err());
        assert!(parse(FrType::Ipv4Addr, "10.0.0").is_err());
        assert!(parse(FrType::Ipv4Addr, "256.0.0.1").is_err());
    }

    #[test]
    fn ipv6_forms() {
        let a = parse(FrType::Ipv6Addr, "fe80::1%3").unwrap();
        assert_eq!(inet(&a).scope_id, 3);
        let p = parse(FrType::Ipv6Prefix, "2001:db8::1/32").unwrap();
        assert_eq!(inet(&p), InetAddr::v6("2001:db8::".parse().unwrap(), 32, 0));
        assert!(parse(FrType::Ipv6Addr, "2001:db8::/64").is_err());
        assert!(parse(FrType::Ipv6Addr, "fe80::1%eth0").is_err());
        assert!(parse(FrType::Ipv6Prefix, "::/129").is_err());
    }

    #[test]
    fn combo_rewrites_type() {
        let mut ty = FrType::ComboIpAddr;
        let v = ValueBox::from_str(&mut ty, None, b"::1", None, false).unwrap();
        assert_eq!(ty, FrType::Ipv6Addr);
        assert_eq!(v.ty(), FrType::Ipv6Addr);

        let mut ty = FrType::ComboIpPrefix;
        ValueBox::from_str(&mut ty, None, b"10/8", None, false).unwrap();
        assert_eq!(ty, FrType::Ipv4Prefix);
    }

    #[test]
    fn strings_and_octets() {
        let s = ValueBox::from_str(&mut FrType::String, None, br"a\tb", Some(b'"'), true).unwrap();
        assert_eq!(s.as_bytes(), Some(&b"a\tb"[..]));
        assert!(s.tainted);
        assert!(s.datum().buf().unwrap().is_terminated());
        let raw = parse(FrType::String, r"a\tb").unwrap();
        assert_eq!(raw.as_bytes(), Some(&br"a\tb"[..]));

        assert_eq!(parse(FrType::Octets, "0xdeadBEEF").unwrap().as_bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
        assert_eq!(parse(FrType::Octets, "plain").unwrap().as_bytes(), Some(&b"plain"[..]));
        assert_eq!(
            parse(FrType::Octets, "0xabc").unwrap_err().to_string(),
            "Length of Hex String is not even, got 3 uint8s"
        );
        assert_eq!(parse(FrType::Octets, "0xzz").unwrap_err().to_string(), "Invalid hex data");
    }

    #[test]
    fn ethernet_and_ifid() {
        let want = ValueBox::new(Datum::Ethernet([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
        assert_eq!(parse(FrType::Ethernet, "00:11:22:33:44:55").unwrap(), want);
        assert_eq!(parse(FrType::Ethernet, "0:11:22:33:44:55").unwrap(), want);
        assert_eq!(parse(FrType::Ethernet, "0011.2233.4455").unwrap(), want);
        assert_eq!(parse(FrType::Ethernet, "73588229205").unwrap(), want);
        assert!(parse(FrType::Ethernet, "00:11:22:33:44").is_err());
        assert!(parse(FrType::Ethernet, "00:11:22:33:44:55:66").is_err());
        assert!(parse(FrType::Ethernet, "18446744073709551615").is_err());

        let ifid = parse(FrType::Ifid, "0:0:102:304").unwrap();
        assert_eq!(ifid, ValueBox::new(Datum::Ifid([0, 0, 0, 0, 1, 2, 3, 4])));
        assert!(parse(FrType::Ifid, "0:0:0").is_err());
        assert!(parse(FrType::Ifid, "0:0:0:12345").is_err());
    }

    #[test]
    fn scalars() {
        assert_eq!(parse(FrType::Bool, "yes").unwrap(), ValueBox::new(Datum::Bool(true)));
        assert_eq!(parse(FrType::Bool, "false").unwrap(), ValueBox::new(Datum::Bool(false)));
        assert_eq!(parse(FrType::Bool, "maybe").unwrap_err().to_string(), "\"maybe\" is not a valid boolean value");
        assert_eq!(parse(FrType::Float64, "1.25").unwrap(), ValueBox::new(Datum::Float64(1.25)));
        assert_eq!(parse(FrType::Float32, "x").unwrap_err().to_string(), "Failed parsing \"x\" as a float32");
        assert_eq!(parse(FrType::Size, "4096").unwrap(), ValueBox::new(Datum::Size(4096)));
        assert!(parse(FrType::Size, "-1").is_err());
        assert_eq!(parse(FrType::Date, "86400").unwrap(), ValueBox::new(Datum::Date(86400)));
        assert_eq!(parse(FrType::Date, "whenever").unwrap_err().to_string(), "failed to parse time string \"whenever\"");
    }

    #[cfg(feature = "chrono-dates")]
    #[test]
    fn rfc3339_dates() {
        assert_eq!(parse(FrType::Date, "1970-01-02T00:00:00Z").unwrap(), ValueBox::new(Datum::Date(86400)));
        assert_eq!(parse(FrType::Date, "Jan  2 1970 01:00:00 +01:00").unwrap(), ValueBox::new(Datum::Date(86400)));
    }

    #[test]
    fn timevals() {
        assert_eq!(parse(FrType::Timeval, "5").unwrap(), ValueBox::new(Datum::Timeval(Timeval { sec: 5, usec: 0 })));
        assert_eq!(
            parse(FrType::Timeval, "1.5").unwrap(),
            ValueBox::new(Datum::Timeval(Timeval { sec: 1, usec: 500_000 }))
        );
        assert_eq!(
            parse(FrType::Timeval, "2.0000019").unwrap(),
            ValueBox::new(Datum::Timeval(Timeval { sec: 2, usec: 1 }))
        );
        assert!(parse(FrType::Timeval, "1.").is_err());
        assert!(parse(FrType::Timeval, "a.1").is_err());
    }

    #[test]
    fn structural_types() {
        assert!(matches!(parse(FrType::Tlv, "x"), Err(ValueErr::UnsupportedType { op: "parse", ty: FrType::Tlv })));
        assert!(parse(FrType::Vsa, "x").unwrap_err().to_string().starts_with("Must use 'Attr-26"));
    }

    #[test]
    fn aliases() {
        let mut table = EnumTable::new("Service-Type", FrType::Uint32);
        table.add("Framed-User", ValueBox::new(Datum::Uint32(2))).unwrap();
        let table = Arc::new(table);

        let mut ty = FrType::Uint32;
        let v = ValueBox::from_str(&mut ty, Some(&table), b"Framed-User", None, true).unwrap();
        assert_eq!(v, ValueBox::new(Datum::Uint32(2)));
        assert!(v.tainted);
        assert!(Arc::ptr_eq(&v.enumv().unwrap(), &table));

        let quoted = ValueBox::from_str(&mut ty, Some(&table), br"Framed\-User", Some(b'"'), false);
        assert!(quoted.is_err());

        let fallback = ValueBox::from_str(&mut ty, Some(&table), b"7", None, false).unwrap();
        assert_eq!(fallback, ValueBox::new(Datum::Uint32(7)));
        assert!(fallback.enumv().is_some());
    }
}
