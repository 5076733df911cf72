//! Type conversion.
//!
//! [`ValueBox::cast`] converts a value to another type. Strings are parsed, octets are decoded as
//! wire data, addresses move between families through the IPv4-mapped IPv6 range
//! (`::ffff:0:0/96`), and integers widen when the value survives the trip. Narrowing between
//! integer widths is only possible through `octets`.

use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use tracing::trace;
use zerocopy::{FromBytes, IntoBytes};

use crate::network::{Ipv4PrefixWire, Ipv6PrefixWire};
use crate::{strerror, Buf, Datum, EnumTable, FrType, InetAddr, Timeval, ValueBox, ValueErr};

/// Bits in the IPv4-mapped IPv6 prefix.
const V4_MAPPED_BITS: u8 = 96;

fn invalid(src: FrType, dst: FrType) -> ValueErr {
    ValueErr::InvalidCast { src, dst, reason: None }
}

fn invalid_because(src: FrType, dst: FrType, reason: impl Into<String>) -> ValueErr {
    ValueErr::InvalidCast { src, dst, reason: Some(reason.into()) }
}

fn ipv4_of(a: &InetAddr) -> Ipv4Addr {
    match a.addr {
        IpAddr::V4(v4) => v4,
        IpAddr::V6(_) => {
            let o = a.octets();
            Ipv4Addr::new(o[0], o[1], o[2], o[3])
        }
    }
}

fn ipv6_of(a: &InetAddr) -> Ipv6Addr {
    match a.addr {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    }
}

fn unmap(src: FrType, dst: FrType, a: &InetAddr) -> Result<Ipv4Addr, ValueErr> {
    ipv6_of(a)
        .to_ipv4_mapped()
        .ok_or_else(|| invalid_because(src, dst, "No IPv4-IPv6 mapping prefix"))
}

fn exact_prefix(src: FrType, dst: FrType, a: &InetAddr, want: u8) -> Result<(), ValueErr> {
    if a.prefix != want {
        return Err(invalid_because(
            src,
            dst,
            format!("Only /{want} (not /{}) prefixes may be cast to IP address types", a.prefix),
        ));
    }
    Ok(())
}

fn exact_octets(src: FrType, dst: FrType, b: &Buf, want: usize) -> Result<(), ValueErr> {
    if b.len() != want {
        return Err(invalid_because(
            src,
            dst,
            format!("Only {want} uint8 octet strings may be cast to IP address types"),
        ));
    }
    Ok(())
}

fn to_string(src: &ValueBox) -> Result<Datum, ValueErr> {
    let buf = match &src.datum {
        Datum::Octets(b) => Buf::duplicate_str(b.as_bytes())?,
        _ => Buf::duplicate_str(&src.print_bytes(None))?,
    };
    Ok(Datum::Str(buf))
}

fn to_octets(src: &ValueBox) -> Result<Datum, ValueErr> {
    let buf = match &src.datum {
        Datum::Str(b) => Buf::duplicate(b.as_bytes())?,
        Datum::Ipv4Addr(a) => Buf::duplicate(&ipv4_of(a).octets())?,
        Datum::Ipv4Prefix(a) => Buf::duplicate(Ipv4PrefixWire::from_inet(a)?.as_bytes())?,
        Datum::Ipv6Addr(a) => Buf::duplicate(&ipv6_of(a).octets())?,
        Datum::Ipv6Prefix(a) => Buf::duplicate(Ipv6PrefixWire::from_inet(a)?.as_bytes())?,
        other => Buf::duplicate(&other.flip().ne_bytes())?,
    };
    Ok(Datum::Octets(buf))
}

fn to_ipv4addr(src: &ValueBox) -> Result<Datum, ValueErr> {
    let (st, dt) = (src.ty(), FrType::Ipv4Addr);
    let addr = match &src.datum {
        Datum::Ipv6Addr(a) => unmap(st, dt, a)?,
        Datum::Ipv4Prefix(a) => {
            exact_prefix(st, dt, a, 32)?;
            ipv4_of(a)
        }
        Datum::Ipv6Prefix(a) => {
            exact_prefix(st, dt, a, 128)?;
            unmap(st, dt, a)?
        }
        Datum::Octets(b) => {
            exact_octets(st, dt, b, 4)?;
            Ipv4Addr::from(<[u8; 4]>::read_from_bytes(b.as_bytes())?)
        }
        Datum::Uint32(v) | Datum::Date(v) => Ipv4Addr::from(*v),
        Datum::Int32(v) => Ipv4Addr::from(*v as u32),
        _ => return Err(invalid_because(st, dt, "Unsupported")),
    };
    Ok(Datum::Ipv4Addr(InetAddr::v4(addr, 32)))
}

fn to_ipv4prefix(src: &ValueBox) -> Result<Datum, ValueErr> {
    let (st, dt) = (src.ty(), FrType::Ipv4Prefix);
    let inet = match &src.datum {
        Datum::Ipv4Addr(a) => InetAddr::v4(ipv4_of(a), 32),
        Datum::Ipv6Addr(a) => InetAddr::v4(unmap(st, dt, a)?, 32),
        Datum::Ipv6Prefix(a) => {
            let v4 = unmap(st, dt, a)?;
            if a.prefix < V4_MAPPED_BITS {
                return Err(invalid_because(
                    st,
                    dt,
                    format!("Expected prefix >= {V4_MAPPED_BITS} bits got {} bits", a.prefix),
                ));
            }
            InetAddr::v4(v4, a.prefix - V4_MAPPED_BITS)
        }
        Datum::Octets(b) => {
            exact_octets(st, dt, b, size_of::<Ipv4PrefixWire>())?;
            Ipv4PrefixWire::read_from_bytes(b.as_bytes())?.to_inet()?
        }
        Datum::Uint32(v) => InetAddr::v4(Ipv4Addr::from(*v), 32),
        _ => return Err(invalid_because(st, dt, "Unsupported")),
    };
    Ok(Datum::Ipv4Prefix(inet))
}

fn to_ipv6addr(src: &ValueBox) -> Result<Datum, ValueErr> {
    let (st, dt) = (src.ty(), FrType::Ipv6Addr);
    let inet = match &src.datum {
        Datum::Ipv4Addr(a) => InetAddr::v6(ipv4_of(a).to_ipv6_mapped(), 128, 0),
        Datum::Ipv4Prefix(a) => {
            exact_prefix(st, dt, a, 32)?;
            InetAddr::v6(ipv4_of(a).to_ipv6_mapped(), 128, 0)
        }
        Datum::Ipv6Prefix(a) => {
            exact_prefix(st, dt, a, 128)?;
            InetAddr::v6(ipv6_of(a), 128, a.scope_id)
        }
        Datum::Octets(b) => {
            exact_octets(st, dt, b, 16)?;
            InetAddr::v6(Ipv6Addr::from(<[u8; 16]>::read_from_bytes(b.as_bytes())?), 128, 0)
        }
        _ => return Err(invalid_because(st, dt, "Unsupported")),
    };
    Ok(Datum::Ipv6Addr(inet))
}

fn to_ipv6prefix(src: &ValueBox) -> Result<Datum, ValueErr> {
    let (st, dt) = (src.ty(), FrType::Ipv6Prefix);
    let inet = match &src.datum {
        Datum::Ipv4Addr(a) => InetAddr::v6(ipv4_of(a).to_ipv6_mapped(), 128, 0),
        Datum::Ipv4Prefix(a) => InetAddr::v6(ipv4_of(a).to_ipv6_mapped(), V4_MAPPED_BITS + a.prefix.min(32), 0),
        Datum::Ipv6Addr(a) => InetAddr::v6(ipv6_of(a), 128, a.scope_id),
        Datum::Octets(b) => {
            exact_octets(st, dt, b, size_of::<Ipv6PrefixWire>())?;
            Ipv6PrefixWire::read_from_bytes(b.as_bytes())?.to_inet()?
        }
        _ => return Err(invalid_because(st, dt, "Unsupported")),
    };
    Ok(Datum::Ipv6Prefix(inet))
}

/// Resolve a combo destination to the concrete address type matching the source family.
fn to_combo(src: &ValueBox, dst_type: FrType) -> Result<Datum, ValueErr> {
    let want_prefix = dst_type == FrType::ComboIpPrefix;
    match (&src.datum, want_prefix) {
        (Datum::Ipv4Addr(_) | Datum::Ipv6Addr(_), false) | (Datum::Ipv4Prefix(_) | Datum::Ipv6Prefix(_), true) => {
            Ok(src.datum.clone())
        }
        (Datum::Ipv4Addr(_), true) => to_ipv4prefix(src),
        (Datum::Ipv6Addr(_), true) => to_ipv6prefix(src),
        (Datum::Octets(b), false) if b.len() == 4 => to_ipv4addr(src),
        (Datum::Octets(b), false) if b.len() == 16 => to_ipv6addr(src),
        (Datum::Octets(b), true) if b.len() == size_of::<Ipv4PrefixWire>() => to_ipv4prefix(src),
        (Datum::Octets(b), true) if b.len() == size_of::<Ipv6PrefixWire>() => to_ipv6prefix(src),
        _ => Err(invalid(src.ty(), dst_type)),
    }
}

/// Integer view of a numeric payload: value, width in bits, signedness.
fn integer_of(d: &Datum) -> Option<(i128, u32, bool)> {
    Some(match d {
        Datum::Uint8(v) => (i128::from(*v), 8, false),
        Datum::Uint16(v) => (i128::from(*v), 16, false),
        Datum::Uint32(v) | Datum::Date(v) => (i128::from(*v), 32, false),
        Datum::Uint64(v)
        | Datum::DateMilliseconds(v)
        | Datum::DateMicroseconds(v)
        | Datum::DateNanoseconds(v) => (i128::from(*v), 64, false),
        Datum::Int8(v) => (i128::from(*v), 8, true),
        Datum::Int16(v) => (i128::from(*v), 16, true),
        Datum::Int32(v) => (i128::from(*v), 32, true),
        Datum::Int64(v) => (i128::from(*v), 64, true),
        _ => return None,
    })
}

/// Build an integer payload of `ty`, or `None` if `v` is outside its range.
pub(crate) fn integer_datum(ty: FrType, v: i128) -> Option<Datum> {
    Some(match ty {
        FrType::Uint8 => Datum::Uint8(u8::try_from(v).ok()?),
        FrType::Uint16 => Datum::Uint16(u16::try_from(v).ok()?),
        FrType::Uint32 => Datum::Uint32(u32::try_from(v).ok()?),
        FrType::Uint64 => Datum::Uint64(u64::try_from(v).ok()?),
        FrType::Int8 => Datum::Int8(i8::try_from(v).ok()?),
        FrType::Int16 => Datum::Int16(i16::try_from(v).ok()?),
        FrType::Int32 => Datum::Int32(i32::try_from(v).ok()?),
        FrType::Int64 => Datum::Int64(i64::try_from(v).ok()?),
        FrType::Date => Datum::Date(u32::try_from(v).ok()?),
        FrType::DateMilliseconds => Datum::DateMilliseconds(u64::try_from(v).ok()?),
        FrType::DateMicroseconds => Datum::DateMicroseconds(u64::try_from(v).ok()?),
        FrType::DateNanoseconds => Datum::DateNanoseconds(u64::try_from(v).ok()?),
        FrType::Size => Datum::Size(usize::try_from(v).ok()?),
        _ => return None,
    })
}

/// Width in bits of an integer-like destination.
fn integer_width(ty: FrType) -> Option<u32> {
    match ty {
        FrType::Uint8 | FrType::Int8 => Some(8),
        FrType::Uint16 | FrType::Int16 => Some(16),
        FrType::Uint32 | FrType::Int32 | FrType::Date => Some(32),
        FrType::Uint64
        | FrType::Int64
        | FrType::DateMilliseconds
        | FrType::DateMicroseconds
        | FrType::DateNanoseconds => Some(64),
        FrType::Size => Some(usize::BITS),
        _ => None,
    }
}

fn widen(src: &Datum, dst_type: FrType) -> Result<Datum, ValueErr> {
    let st = src.ty();
    let Some((value, src_bits, signed)) = integer_of(src) else {
        return Err(invalid(st, dst_type));
    };
    let Some(dst_bits) = integer_width(dst_type) else {
        return Err(invalid(st, dst_type));
    };
    // Dates only take unsigned sources of their own width or less.
    let date_like = matches!(
        dst_type,
        FrType::Date | FrType::DateMilliseconds | FrType::DateMicroseconds | FrType::DateNanoseconds | FrType::Size
    );
    if src_bits > dst_bits || (date_like && signed) {
        return Err(invalid(st, dst_type));
    }
    integer_datum(dst_type, value).ok_or_else(|| {
        invalid_because(st, dst_type, format!("Source value {value} is outside of destination type range"))
    })
}

fn from_octets(b: &Buf, dst_type: FrType) -> Result<Datum, ValueErr> {
    let st = FrType::Octets;
    let (min, max) = dst_type.network_bounds();
    if (min, max) == (0, 0) {
        return Err(invalid(st, dst_type));
    }
    if b.len() < min {
        return Err(invalid_because(
            st,
            dst_type,
            format!("Source is length {} is smaller than destination type size {min}", b.len()),
        ));
    }
    if b.len() > max {
        return Err(invalid_because(
            st,
            dst_type,
            format!("Source length {} is greater than destination type size {max}", b.len()),
        ));
    }
    if dst_type == FrType::Abinary {
        return Ok(Datum::Abinary(Buf::duplicate(b.as_bytes())?));
    }
    ValueBox::from_network(b.as_bytes(), dst_type, false).map(ValueBox::into_datum)
}

fn cast_generic(src: &ValueBox, dst_type: FrType) -> Result<Datum, ValueErr> {
    let st = src.ty();
    match (&src.datum, dst_type) {
        (Datum::Octets(b), _) => from_octets(b, dst_type),

        (Datum::Ifid(v), FrType::Uint64) => Ok(Datum::Uint64(u64::from_be_bytes(*v))),
        (Datum::Uint64(v), FrType::Ifid) => Ok(Datum::Ifid(v.to_be_bytes())),
        (Datum::Uint64(v), FrType::Ethernet) => {
            let bytes = v.to_be_bytes();
            if bytes[..2] != [0, 0] {
                return Err(invalid_because(st, dst_type, format!("Source value {v} is wider than 48 bits")));
            }
            let mut ether = [0u8; 6];
            ether.copy_from_slice(&bytes[2..]);
            Ok(Datum::Ethernet(ether))
        }
        (Datum::Ethernet(e), FrType::Uint64) => {
            let mut bytes = [0u8; 8];
            bytes[2..].copy_from_slice(e);
            Ok(Datum::Uint64(u64::from_be_bytes(bytes)))
        }

        (Datum::Ipv4Addr(a), FrType::Uint32) => Ok(Datum::Uint32(u32::from(ipv4_of(a)))),
        (Datum::Ipv4Addr(a), FrType::Date) => Ok(Datum::Date(u32::from(ipv4_of(a)))),
        (Datum::Ipv4Addr(a), FrType::Int32) => Ok(Datum::Int32(u32::from(ipv4_of(a)) as i32)),

        (Datum::Float32(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Uint8(v), FrType::Float32) => Ok(Datum::Float32(f32::from(*v))),
        (Datum::Uint16(v), FrType::Float32) => Ok(Datum::Float32(f32::from(*v))),
        (Datum::Int8(v), FrType::Float32) => Ok(Datum::Float32(f32::from(*v))),
        (Datum::Int16(v), FrType::Float32) => Ok(Datum::Float32(f32::from(*v))),
        (Datum::Uint8(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Uint16(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Uint32(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Int8(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Int16(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),
        (Datum::Int32(v), FrType::Float64) => Ok(Datum::Float64(f64::from(*v))),

        (Datum::Uint8(_) | Datum::Uint16(_) | Datum::Uint32(_) | Datum::Uint64(_), FrType::Timeval) => {
            let (value, _, _) = integer_of(&src.datum).ok_or_else(|| invalid(st, dst_type))?;
            let sec = i64::try_from(value).map_err(|_| {
                invalid_because(st, dst_type, format!("Source value {value} is outside of destination type range"))
            })?;
            Ok(Datum::Timeval(Timeval { sec, usec: 0 }))
        }

        (_, FrType::Ifid | FrType::Ethernet | FrType::Bool | FrType::Float32 | FrType::Float64)
        | (_, FrType::Timeval | FrType::Abinary) => Err(invalid(st, dst_type)),

        _ => widen(&src.datum, dst_type),
    }
}

impl ValueBox {
    /// Convert to `dst_type`, attaching `dst_enumv` to the result.
    ///
    /// Casting to the same type is a deep copy. The result keeps the source's `tainted` flag.
    ///
    /// | Destination | Accepted sources |
    /// |-------------|------------------|
    /// | `string` | anything; octets are taken as raw text, the rest is printed |
    /// | `octets` | anything; addresses use their wire layout, scalars their big-endian bytes (`size` and `timeval` have no wire form and keep host byte order) |
    /// | `ipaddr` | IPv4-mapped `ipv6addr`, `/32` prefixes, `/128` mapped prefixes, 4 octets, `uint32` |
    /// | `ipv4prefix` | `ipaddr`, mapped IPv6 with prefix `>= 96`, 5 octets, `uint32` |
    /// | `ipv6addr` | `ipaddr`, `/32` IPv4 prefixes, `/128` prefixes, 16 octets |
    /// | `ipv6prefix` | any address or prefix, 18 octets |
    /// | integers | narrower or equal integers whose value fits, octets of the exact width |
    ///
    /// Strings are run through [`ValueBox::from_str`] for every destination but `octets`.
    ///
    /// # Errors
    ///
    /// [`ValueErr::InvalidCast`] naming both types when no rule applies or the value does not
    /// survive the conversion. Parse errors when a string source is malformed.
    /// [`ValueErr::IncompatibleFamilies`] or [`ValueErr::InvalidPrefix`] when an address payload
    /// does not fit its own type.
    ///
    /// # Panics
    ///
    /// If `self` is invalid or `dst_type` is [`FrType::Invalid`].
    pub fn cast(&self, dst_type: FrType, dst_enumv: Option<&Arc<EnumTable>>) -> Result<ValueBox, ValueErr> {
        assert!(dst_type != FrType::Invalid, "cast to the invalid type");
        assert!(!self.is_invalid(), "cast of an invalid value box");
        strerror::track(self.cast_inner(dst_type, dst_enumv))
    }

    fn cast_inner(&self, dst_type: FrType, dst_enumv: Option<&Arc<EnumTable>>) -> Result<ValueBox, ValueErr> {
        let st = self.ty();
        if dst_type.is_structural() {
            return Err(invalid_because(st, dst_type, "Can only cast simple data types."));
        }
        self.datum.check_inet()?;
        if dst_type == st {
            return self.copy();
        }
        trace!(src = %st, dst = %dst_type, "cast");

        let datum = match (dst_type, &self.datum) {
            (FrType::String, _) => to_string(self)?,
            (FrType::Octets, _) => to_octets(self)?,
            (_, Datum::Str(s)) => {
                let mut ty = dst_type;
                return ValueBox::from_str(&mut ty, dst_enumv, s.as_bytes(), None, self.tainted);
            }
            (FrType::Ipv4Addr, _) => to_ipv4addr(self)?,
            (FrType::Ipv4Prefix, _) => to_ipv4prefix(self)?,
            (FrType::Ipv6Addr, _) => to_ipv6addr(self)?,
            (FrType::Ipv6Prefix, _) => to_ipv6prefix(self)?,
            (FrType::ComboIpAddr | FrType::ComboIpPrefix, _) => to_combo(self, dst_type)?,
            _ => cast_generic(self, dst_type)?,
        };
        Ok(ValueBox::with_meta(datum, self.tainted, dst_enumv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(d: Datum) -> ValueBox {
        ValueBox::new(d)
    }

    fn v4(a: [u8; 4]) -> ValueBox {
        b(Datum::Ipv4Addr(InetAddr::v4(Ipv4Addr::from(a), 32)))
    }

    #[test]
    fn same_type_is_copy() {
        let s = ValueBox::strdup("x", true).unwrap();
        let c = s.cast(FrType::String, None).unwrap();
        assert_eq!(c, s);
        assert!(c.tainted);
        assert_eq!(s.datum().buf().unwrap().holders(), 1);
    }

    #[test]
    fn structural_rejected() {
        let err = b(Datum::Uint8(1)).cast(FrType::Tlv, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid cast from uint8 to tlv.  Can only cast simple data types.");
    }

    #[test]
    fn unsigned_to_signed_range() {
        let err = b(Datum::Uint32(0x8000_0000)).cast(FrType::Int32, None).unwrap_err();
        assert!(matches!(err, ValueErr::InvalidCast { src: FrType::Uint32, dst: FrType::Int32, .. }));
        assert_eq!(b(Datum::Uint32(5)).cast(FrType::Int32, None).unwrap(), b(Datum::Int32(5)));
        assert_eq!(b(Datum::Uint16(65535)).cast(FrType::Int32, None).unwrap(), b(Datum::Int32(65535)));
    }

    #[test]
    fn widening_ladder() {
        assert_eq!(b(Datum::Uint8(200)).cast(FrType::Uint16, None).unwrap(), b(Datum::Uint16(200)));
        assert_eq!(b(Datum::Uint32(7)).cast(FrType::Uint64, None).unwrap(), b(Datum::Uint64(7)));
        assert_eq!(b(Datum::Date(9)).cast(FrType::Uint64, None).unwrap(), b(Datum::Uint64(9)));
        assert_eq!(b(Datum::Int8(-3)).cast(FrType::Int64, None).unwrap(), b(Datum::Int64(-3)));
        assert_eq!(b(Datum::Int32(3)).cast(FrType::Uint32, None).unwrap(), b(Datum::Uint32(3)));
        assert!(b(Datum::Int32(-1)).cast(FrType::Uint32, None).is_err());
        assert!(b(Datum::Uint64(1)).cast(FrType::Uint32, None).is_err());
        assert!(b(Datum::Uint64(1)).cast(FrType::Int32, None).is_err());
        assert!(b(Datum::Int8(1)).cast(FrType::Date, None).is_err());
    }

    #[test]
    fn narrowing_through_octets() {
        let wide = b(Datum::Uint64(0x1234));
        let bytes = wide.cast(FrType::Octets, None).unwrap();
        assert_eq!(bytes.as_bytes(), Some(&[0, 0, 0, 0, 0, 0, 0x12, 0x34][..]));
        let err = bytes.cast(FrType::Uint16, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid cast from octets to uint16.  Source length 8 is greater than destination type size 2"
        );
        let two = ValueBox::memdup(&[0x12, 0x34], true).unwrap();
        let n = two.cast(FrType::Uint16, None).unwrap();
        assert_eq!(n, b(Datum::Uint16(0x1234)));
        assert!(n.tainted);
    }

    #[test]
    fn float_arms_are_independent() {
        assert_eq!(b(Datum::Float32(1.5)).cast(FrType::Float64, None).unwrap(), b(Datum::Float64(1.5)));
        assert_eq!(b(Datum::Int32(-7)).cast(FrType::Float64, None).unwrap(), b(Datum::Float64(-7.0)));
        assert!(b(Datum::Float64(1.5)).cast(FrType::Float32, None).is_err());
        assert!(b(Datum::Uint32(1)).cast(FrType::Float32, None).is_err());
    }

    #[test]
    fn to_and_from_strings() {
        let s = b(Datum::Uint32(42)).cast(FrType::String, None).unwrap();
        assert_eq!(s.as_str().unwrap(), "42");
        let o = ValueBox::memdup(b"raw", false).unwrap().cast(FrType::String, None).unwrap();
        assert_eq!(o.as_str().unwrap(), "raw");
        let n = ValueBox::strdup("1234", false).unwrap().cast(FrType::Uint16, None).unwrap();
        assert_eq!(n, b(Datum::Uint16(1234)));
        let bytes = ValueBox::strdup("0x01", false).unwrap().cast(FrType::Octets, None).unwrap();
        assert_eq!(bytes.as_bytes(), Some(&b"0x01"[..]));
    }

    #[test]
    fn ipv4_interop() {
        let mapped = b(Datum::Ipv6Addr(InetAddr::v6(Ipv4Addr::new(192, 0, 2, 1).to_ipv6_mapped(), 128, 0)));
        assert_eq!(mapped.cast(FrType::Ipv4Addr, None).unwrap(), v4([192, 0, 2, 1]));
        let plain = b(Datum::Ipv6Addr(InetAddr::v6(Ipv6Addr::LOCALHOST, 128, 0)));
        let err = plain.cast(FrType::Ipv4Addr, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid cast from ipv6addr to ipaddr.  No IPv4-IPv6 mapping prefix");

        let p24 = b(Datum::Ipv4Prefix(InetAddr::v4(Ipv4Addr::new(10, 0, 0, 0), 24)));
        assert!(p24.cast(FrType::Ipv4Addr, None).is_err());
        assert!(p24.cast(FrType::Ipv6Addr, None).is_err());
        let p6 = p24.cast(FrType::Ipv6Prefix, None).unwrap();
        assert_eq!(p6.datum().inet().unwrap().prefix, 120);
        let back = p6.cast(FrType::Ipv4Prefix, None).unwrap();
        assert_eq!(back, p24);

        let short = b(Datum::Ipv6Prefix(InetAddr::v6(Ipv4Addr::new(10, 0, 0, 0).to_ipv6_mapped(), 90, 0)));
        assert!(short.cast(FrType::Ipv4Prefix, None).is_err());
    }

    #[test]
    fn addresses_and_integers() {
        assert_eq!(b(Datum::Uint32(0x0a000001)).cast(FrType::Ipv4Addr, None).unwrap(), v4([10, 0, 0, 1]));
        assert_eq!(v4([10, 0, 0, 1]).cast(FrType::Uint32, None).unwrap(), b(Datum::Uint32(0x0a000001)));
        assert_eq!(v4([255, 0, 0, 1]).cast(FrType::Int32, None).unwrap(), b(Datum::Int32(0xff000001u32 as i32)));
        assert_eq!(
            v4([1, 2, 3, 4]).cast(FrType::Octets, None).unwrap().as_bytes(),
            Some(&[1u8, 2, 3, 4][..])
        );
    }

    #[test]
    fn size_and_timeval_octets_are_host_order() {
        let o = b(Datum::Size(0x0102)).cast(FrType::Octets, None).unwrap();
        assert_eq!(o.as_bytes(), Some(&0x0102usize.to_ne_bytes()[..]));
        let mut want = 1i64.to_ne_bytes().to_vec();
        want.extend_from_slice(&2u32.to_ne_bytes());
        let t = b(Datum::Timeval(Timeval { sec: 1, usec: 2 })).cast(FrType::Octets, None).unwrap();
        assert_eq!(t.as_bytes(), Some(&want[..]));
    }

    #[test]
    fn address_octets() {
        let five = ValueBox::memdup(&[16, 172, 16, 0, 0], false).unwrap();
        let p = five.cast(FrType::Ipv4Prefix, None).unwrap();
        assert_eq!(p.datum().inet().unwrap().prefix, 16);
        assert_eq!(p.cast(FrType::Octets, None).unwrap(), five);

        let mut eighteen = vec![0u8, 64];
        eighteen.extend_from_slice(&"2001:db8::".parse::<Ipv6Addr>().unwrap().octets());
        let p6 = ValueBox::memdup(&eighteen, false).unwrap().cast(FrType::Ipv6Prefix, None).unwrap();
        assert_eq!(p6.datum().inet().unwrap().addr, IpAddr::V6("2001:db8::".parse().unwrap()));
        assert_eq!(p6.datum().inet().unwrap().prefix, 64);

        let err = ValueBox::memdup(&[1, 2, 3], false).unwrap().cast(FrType::Ipv4Addr, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid cast from octets to ipaddr.  Only 4 uint8 octet strings may be cast to IP address types"
        );
    }

    #[test]
    fn ifid_ethernet_and_combo() {
        let ifid = b(Datum::Ifid([0, 0, 0, 0, 0, 0, 1, 2]));
        assert_eq!(ifid.cast(FrType::Uint64, None).unwrap(), b(Datum::Uint64(0x0102)));
        let e = b(Datum::Uint64(0x0000_0011_2233_4455)).cast(FrType::Ethernet, None).unwrap();
        assert_eq!(e, b(Datum::Ethernet([0, 0x11, 0x22, 0x33, 0x44, 0x55])));
        assert!(b(Datum::Uint64(u64::MAX)).cast(FrType::Ethernet, None).is_err());

        let c = ValueBox::memdup(&[127, 0, 0, 1], false).unwrap().cast(FrType::ComboIpAddr, None).unwrap();
        assert_eq!(c.ty(), FrType::Ipv4Addr);
        let cp = v4([10, 0, 0, 1]).cast(FrType::ComboIpPrefix, None).unwrap();
        assert_eq!(cp.ty(), FrType::Ipv4Prefix);
    }

    #[test]
    fn timeval_from_integers() {
        let t = b(Datum::Uint32(5)).cast(FrType::Timeval, None).unwrap();
        assert_eq!(t, b(Datum::Timeval(Timeval { sec: 5, usec: 0 })));
        assert!(b(Datum::Uint64(u64::MAX)).cast(FrType::Timeval, None).is_err());
    }

    #[test]
    fn enumv_is_attached() {
        let table = Arc::new(EnumTable::new("Test-Attr", FrType::Uint32));
        let v = b(Datum::Uint16(1)).cast(FrType::Uint32, Some(&table)).unwrap();
        assert!(Arc::ptr_eq(&v.enumv().unwrap(), &table));
    }
}
