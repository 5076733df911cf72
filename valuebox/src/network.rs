//! Wire encoding.
//!
//! Integers, floats and dates are big-endian, two's complement for signed types. Booleans are one
//! byte. Addresses are copied as is; prefixes carry their length (and IPv6 scope) in front:
//!
//! ```text
//! ipv4prefix   +--------+--------+--------+--------+--------+
//!              | prefix |            address (4)            |
//!              +--------+--------+--------+--------+--------+
//!
//! ipv6prefix   +--------+--------+--------+ ... +--------+
//!              | scope  | prefix |    address (16)        |
//!              +--------+--------+--------+ ... +--------+
//! ```
//!
//! Strings and octets are raw bytes with no terminator or length.

use smallvec::SmallVec;
use tracing::debug;
use zerocopy::byteorder::network_endian::{F32, F64, I16, I32, I64, U16, U32, U64};
use zerocopy::{FromBytes, IntoBytes};
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{strerror, Buf, Datum, FrType, InetAddr, ValueBox, ValueErr};
use core::net::{Ipv4Addr, Ipv6Addr};

/// Result of [`ValueBox::to_network`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Bytes written to the destination.
    pub written: usize,
    /// Zero if the whole value fit, otherwise the number of bytes the full encoding needs.
    pub need: usize,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
pub(crate) struct Ipv4PrefixWire {
    pub prefix: u8,
    pub addr: [u8; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
pub(crate) struct Ipv6PrefixWire {
    pub scope_id: u8,
    pub prefix: u8,
    pub addr: [u8; 16],
}

// Fixed network bounds must match what `to_network` writes for each type.
const _: () = {
    const fn fixed(ty: FrType, width: usize) -> bool {
        let (min, max) = ty.network_bounds();
        min == width && max == width
    }
    assert!(fixed(FrType::Ipv4Addr, size_of::<[u8; 4]>()));
    assert!(fixed(FrType::Ipv4Prefix, size_of::<Ipv4PrefixWire>()));
    assert!(fixed(FrType::Ipv6Addr, size_of::<[u8; 16]>()));
    assert!(fixed(FrType::Ipv6Prefix, size_of::<Ipv6PrefixWire>()));
    assert!(fixed(FrType::Ifid, size_of::<[u8; 8]>()));
    assert!(fixed(FrType::Ethernet, size_of::<[u8; 6]>()));
    assert!(fixed(FrType::Bool, size_of::<u8>()));
    assert!(fixed(FrType::Uint8, size_of::<u8>()));
    assert!(fixed(FrType::Int8, size_of::<i8>()));
    assert!(fixed(FrType::Uint16, size_of::<U16>()));
    assert!(fixed(FrType::Int16, size_of::<I16>()));
    assert!(fixed(FrType::Uint32, size_of::<U32>()));
    assert!(fixed(FrType::Int32, size_of::<I32>()));
    assert!(fixed(FrType::Date, size_of::<U32>()));
    assert!(fixed(FrType::Uint64, size_of::<U64>()));
    assert!(fixed(FrType::Int64, size_of::<I64>()));
    assert!(fixed(FrType::DateMilliseconds, size_of::<U64>()));
    assert!(fixed(FrType::DateMicroseconds, size_of::<U64>()));
    assert!(fixed(FrType::DateNanoseconds, size_of::<U64>()));
    assert!(fixed(FrType::Float32, size_of::<F32>()));
    assert!(fixed(FrType::Float64, size_of::<F64>()));
};

impl Ipv4PrefixWire {
    pub(crate) fn from_inet(a: &InetAddr) -> Result<Self, ValueErr> {
        let a = a.checked(false)?;
        let mut addr = [0u8; 4];
        addr.copy_from_slice(&a.octets());
        Ok(Self { prefix: a.prefix, addr })
    }

    pub(crate) fn to_inet(self) -> Result<InetAddr, ValueErr> {
        if self.prefix > 32 {
            return Err(ValueErr::InvalidPrefix("Invalid IPv4 prefix length"));
        }
        Ok(InetAddr::v4(Ipv4Addr::from(self.addr), self.prefix))
    }
}

impl Ipv6PrefixWire {
    pub(crate) fn from_inet(a: &InetAddr) -> Result<Self, ValueErr> {
        let a = a.checked(true)?;
        let mut addr = [0u8; 16];
        addr.copy_from_slice(&a.octets());
        Ok(Self { scope_id: a.scope_id as u8, prefix: a.prefix, addr })
    }

    pub(crate) fn to_inet(self) -> Result<InetAddr, ValueErr> {
        if self.prefix > 128 {
            return Err(ValueErr::InvalidPrefix("Invalid IPv6 prefix length"));
        }
        Ok(InetAddr::v6(Ipv6Addr::from(self.addr), self.prefix, u32::from(self.scope_id)))
    }
}

/// Copy a fixed width encoding into the front of `dst`, returning its length.
macro_rules! put {
    ($dst:ident, $wire:expr) => {{
        let wire = $wire;
        let bytes = wire.as_bytes();
        $dst[..bytes.len()].copy_from_slice(bytes);
        bytes.len()
    }};
}

/// Read a native-order scalar out of exactly sized wire bytes.
macro_rules! ne {
    ($t:ty, $src:ident) => {{
        let mut raw = [0u8; size_of::<$t>()];
        raw.copy_from_slice(&$src[..size_of::<$t>()]);
        <$t>::from_ne_bytes(raw)
    }};
}

impl Datum {
    /// Byte order flip for multi-byte scalars (host to network order).
    ///
    /// # Panics
    ///
    /// On buffer backed, structural and invalid payloads.
    pub(crate) fn flip(&self) -> Datum {
        match self {
            Self::Uint16(v) => Self::Uint16(v.to_be()),
            Self::Uint32(v) => Self::Uint32(v.to_be()),
            Self::Uint64(v) => Self::Uint64(v.to_be()),
            Self::Int16(v) => Self::Int16(v.to_be()),
            Self::Int32(v) => Self::Int32(v.to_be()),
            Self::Int64(v) => Self::Int64(v.to_be()),
            Self::Float32(v) => Self::Float32(f32::from_bits(v.to_bits().to_be())),
            Self::Float64(v) => Self::Float64(f64::from_bits(v.to_bits().to_be())),
            Self::Date(v) => Self::Date(v.to_be()),
            Self::DateMilliseconds(v) => Self::DateMilliseconds(v.to_be()),
            Self::DateMicroseconds(v) => Self::DateMicroseconds(v.to_be()),
            Self::DateNanoseconds(v) => Self::DateNanoseconds(v.to_be()),
            Self::Bool(_)
            | Self::Uint8(_)
            | Self::Int8(_)
            | Self::Ipv4Addr(_)
            | Self::Ipv4Prefix(_)
            | Self::Ipv6Addr(_)
            | Self::Ipv6Prefix(_)
            | Self::Ifid(_)
            | Self::Ethernet(_)
            | Self::Size(_)
            | Self::Timeval(_)
            | Self::Abinary(_) => self.clone(),
            Self::Invalid | Self::Str(_) | Self::Octets(_) => {
                panic!("byte order flip on {} value", self.ty())
            }
        }
    }

    /// Family and prefix check for address payloads. Everything else passes.
    pub(crate) fn check_inet(&self) -> Result<(), ValueErr> {
        match self {
            Self::Ipv4Addr(a) | Self::Ipv4Prefix(a) => a.checked(false).map(drop),
            Self::Ipv6Addr(a) | Self::Ipv6Prefix(a) => a.checked(true).map(drop),
            _ => Ok(()),
        }
    }

    /// The payload's in-memory bytes, in host order.
    pub(crate) fn ne_bytes(&self) -> SmallVec<[u8; 16]> {
        match self {
            Self::Str(b) | Self::Octets(b) | Self::Abinary(b) => SmallVec::from_slice(b.as_bytes()),
            Self::Ipv4Addr(a) | Self::Ipv4Prefix(a) | Self::Ipv6Addr(a) | Self::Ipv6Prefix(a) => a.octets(),
            Self::Ifid(v) => SmallVec::from_slice(v),
            Self::Ethernet(v) => SmallVec::from_slice(v),
            Self::Bool(v) => SmallVec::from_slice(&[u8::from(*v)]),
            Self::Uint8(v) => SmallVec::from_slice(&[*v]),
            Self::Int8(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Uint16(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Int16(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Uint32(v) | Self::Date(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Int32(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Uint64(v)
            | Self::DateMilliseconds(v)
            | Self::DateMicroseconds(v)
            | Self::DateNanoseconds(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Int64(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Float32(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Float64(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Size(v) => SmallVec::from_slice(&v.to_ne_bytes()),
            Self::Timeval(t) => {
                let mut out = SmallVec::from_slice(&t.sec.to_ne_bytes());
                out.extend_from_slice(&t.usec.to_ne_bytes());
                out
            }
            Self::Invalid => SmallVec::new(),
        }
    }
}

impl ValueBox {
    /// Byte order flip of a multi-byte scalar. Single byte and address values come back unchanged.
    ///
    /// # Panics
    ///
    /// On string, octets, structural and invalid values.
    pub fn hton(&self) -> ValueBox {
        Self { datum: self.datum.flip(), tainted: self.tainted, enumv: self.enumv.clone() }
    }

    /// Length of the network encoding: the buffer length for variable types, otherwise the
    /// type's fixed size.
    pub fn network_length(&self) -> usize {
        match self.datum.buf() {
            Some(b) => b.len(),
            None => self.ty().network_bounds().0,
        }
    }

    /// Encode into `dst`.
    ///
    /// Strings and octets are truncated to fit, with [`Encoded::need`] set to the full length.
    /// Fixed width values are never partially written: if `dst` is too small nothing is written
    /// and `need` holds the required size.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::UnsupportedType`] | Types without a network form (`size`, `timeval`, `abinary`) |
    /// | [`ValueErr::IncompatibleFamilies`] | Address payload of the wrong family for its type |
    /// | [`ValueErr::InvalidPrefix`] | Prefix longer than the address family allows |
    ///
    /// # Panics
    ///
    /// On an invalid box.
    pub fn to_network(&self, dst: &mut [u8]) -> Result<Encoded, ValueErr> {
        assert!(!self.is_invalid(), "encoding an invalid value box");
        if let Datum::Str(b) | Datum::Octets(b) = &self.datum {
            let len = b.len().min(dst.len());
            dst[..len].copy_from_slice(&b.as_bytes()[..len]);
            let need = if b.len() > dst.len() { b.len() } else { 0 };
            return Ok(Encoded { written: len, need });
        }

        let ty = self.ty();
        if !ty.is_network_encodable() {
            return strerror::track(Err(ValueErr::UnsupportedType { op: "encode", ty }));
        }
        let (_, max) = ty.network_bounds();
        if max > dst.len() {
            return Ok(Encoded { written: 0, need: max });
        }

        let written = match &self.datum {
            Datum::Ipv4Addr(a) | Datum::Ipv6Addr(a) => {
                let octets = strerror::track(a.checked(ty == FrType::Ipv6Addr))?.octets();
                dst[..octets.len()].copy_from_slice(&octets);
                octets.len()
            }
            Datum::Ipv4Prefix(a) => put!(dst, strerror::track(Ipv4PrefixWire::from_inet(a))?),
            Datum::Ipv6Prefix(a) => put!(dst, strerror::track(Ipv6PrefixWire::from_inet(a))?),
            Datum::Ifid(v) => put!(dst, *v),
            Datum::Ethernet(v) => put!(dst, *v),
            Datum::Bool(v) => put!(dst, u8::from(*v)),
            Datum::Uint8(v) => put!(dst, *v),
            Datum::Int8(v) => put!(dst, *v),
            Datum::Uint16(v) => put!(dst, U16::new(*v)),
            Datum::Int16(v) => put!(dst, I16::new(*v)),
            Datum::Uint32(v) | Datum::Date(v) => put!(dst, U32::new(*v)),
            Datum::Int32(v) => put!(dst, I32::new(*v)),
            Datum::Uint64(v)
            | Datum::DateMilliseconds(v)
            | Datum::DateMicroseconds(v)
            | Datum::DateNanoseconds(v) => put!(dst, U64::new(*v)),
            Datum::Int64(v) => put!(dst, I64::new(*v)),
            Datum::Float32(v) => put!(dst, F32::new(*v)),
            Datum::Float64(v) => put!(dst, F64::new(*v)),
            Datum::Invalid
            | Datum::Str(_)
            | Datum::Octets(_)
            | Datum::Size(_)
            | Datum::Timeval(_)
            | Datum::Abinary(_) => unreachable!("filtered above"),
        };
        Ok(Encoded { written, need: 0 })
    }

    /// Decode wire bytes as type `ty`. The whole of `src` is consumed.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::Truncated`] | `src` shorter than the type's minimum |
    /// | [`ValueErr::TrailingGarbage`] | `src` longer than the type's maximum |
    /// | [`ValueErr::NotAValue`] | `size`, `timeval` and `abinary` have no wire form |
    /// | [`ValueErr::UnsupportedType`] | Structural and parse-only types |
    /// | [`ValueErr::InvalidPrefix`] | Prefix byte larger than the family allows |
    pub fn from_network(src: &[u8], ty: FrType, tainted: bool) -> Result<ValueBox, ValueErr> {
        let res = decode(src, ty)
            .inspect_err(|e| debug!(%ty, len = src.len(), error = %e, "wire decode rejected"))
            .map(|datum| Self::with_meta(datum, tainted, None));
        strerror::track(res)
    }
}

fn decode(src: &[u8], ty: FrType) -> Result<Datum, ValueErr> {
    match ty {
        FrType::Size | FrType::Timeval | FrType::Abinary => return Err(ValueErr::NotAValue(ty)),
        _ if ty.network_bounds() == (0, 0) => return Err(ValueErr::UnsupportedType { op: "decode", ty }),
        _ => {}
    }
    let (min, max) = ty.network_bounds();
    if src.len() < min {
        return Err(ValueErr::Truncated { ty, expected: min, got: src.len() });
    }
    if src.len() > max {
        return Err(ValueErr::TrailingGarbage { ty, expected: max, got: src.len() });
    }

    let datum = match ty {
        FrType::String => Datum::Str(Buf::duplicate_str(src)?),
        FrType::Octets => Datum::Octets(Buf::duplicate(src)?),
        FrType::Ipv4Addr => Datum::Ipv4Addr(InetAddr::v4(Ipv4Addr::from(<[u8; 4]>::read_from_bytes(src)?), 32)),
        FrType::Ipv4Prefix => Datum::Ipv4Prefix(Ipv4PrefixWire::read_from_bytes(src)?.to_inet()?),
        FrType::Ipv6Addr => Datum::Ipv6Addr(InetAddr::v6(Ipv6Addr::from(<[u8; 16]>::read_from_bytes(src)?), 128, 0)),
        FrType::Ipv6Prefix => Datum::Ipv6Prefix(Ipv6PrefixWire::read_from_bytes(src)?.to_inet()?),
        FrType::Ifid => Datum::Ifid(<[u8; 8]>::read_from_bytes(src)?),
        FrType::Ethernet => Datum::Ethernet(<[u8; 6]>::read_from_bytes(src)?),
        FrType::Bool => Datum::Bool(src[0] > 0),
        FrType::Uint8 => Datum::Uint8(src[0]),
        FrType::Int8 => Datum::Int8(src[0] as i8),
        FrType::Uint16 => Datum::Uint16(ne!(u16, src)).flip(),
        FrType::Int16 => Datum::Int16(ne!(i16, src)).flip(),
        FrType::Uint32 => Datum::Uint32(ne!(u32, src)).flip(),
        FrType::Int32 => Datum::Int32(ne!(i32, src)).flip(),
        FrType::Uint64 => Datum::Uint64(ne!(u64, src)).flip(),
        FrType::Int64 => Datum::Int64(ne!(i64, src)).flip(),
        FrType::Float32 => Datum::Float32(ne!(f32, src)).flip(),
        FrType::Float64 => Datum::Float64(ne!(f64, src)).flip(),
        FrType::Date => Datum::Date(ne!(u32, src)).flip(),
        FrType::DateMilliseconds => Datum::DateMilliseconds(ne!(u64, src)).flip(),
        FrType::DateMicroseconds => Datum::DateMicroseconds(ne!(u64, src)).flip(),
        FrType::DateNanoseconds => Datum::DateNanoseconds(ne!(u64, src)).flip(),
        FrType::Invalid
        | FrType::ComboIpAddr
        | FrType::ComboIpPrefix
        | FrType::Size
        | FrType::Timeval
        | FrType::Abinary
        | FrType::Tlv
        | FrType::Struct
        | FrType::Extended
        | FrType::LongExtended
        | FrType::Evs
        | FrType::Vsa
        | FrType::Vendor => unreachable!("rejected above"),
    };
    Ok(datum)
}
