//! Polymorphic boxed values for RADIUS style authentication servers.
//!
//! Protocol attributes are dynamically typed on the wire, but policy and codec code wants to
//! handle them uniformly. A [`ValueBox`] holds exactly one typed value out of the
//! [`FrType`] catalogue together with provenance (`tainted`) and an optional link to the
//! enumeration aliases ([`EnumTable`]) of the attribute it belongs to.
//!
//! Every value has three interchangeable forms:
//!
//! - **Internal** - the [`Datum`] payload, native Rust values.
//! - **Network** - the wire encoding, see [`ValueBox::to_network`] and [`ValueBox::from_network`].
//! - **Presentation** - text used in configuration and logs, see [`ValueBox::from_str`] and
//!   [`ValueBox::asprint`].
//!
//! # Features
//!
//! - **Casting** - [`ValueBox::cast`] converts between types, including IPv4/IPv6 interop and
//!   range checked integer widening.
//! - **CIDR aware comparison** - [`ValueBox::compare_op`] treats `a < b` on prefixes as "a is
//!   inside b".
//! - **Escape aware parsing** - [`unescape`] implements the quoting rules shared by the parser and
//!   the printer.
//! - **Error sink** - failures are returned as [`ValueErr`] and also recorded in
//!   [`strerror::last_error`].
//!
//! # Feature Flags
//!
//! - **`chrono-dates`** (enabled by default) - human readable local time for the `date` type.
//!   Without it dates are read and written as integer seconds.
//!
//! # Quick Start
//!
//! ```rust
//! use valuebox::{FrType, Op, ValueBox};
//!
//! # fn example() -> Result<(), valuebox::ValueErr> {
//! let mut ty = FrType::ComboIpAddr;
//! let addr = ValueBox::from_str(&mut ty, None, b"10.1.2.3", None, true)?;
//! assert_eq!(ty, FrType::Ipv4Addr);
//!
//! let mut pty = FrType::Ipv4Prefix;
//! let net = ValueBox::from_str(&mut pty, None, b"10.0.0.0/8", None, false)?;
//! let inside = addr.cast(FrType::Ipv4Prefix, None)?;
//! assert!(ValueBox::compare_op(Op::Lt, &inside, &net)?);
//!
//! let mut wire = [0u8; 4];
//! let enc = addr.to_network(&mut wire)?;
//! assert_eq!(enc.written, 4);
//! assert_eq!(wire, [10, 1, 2, 3]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Ownership
//!
//! Text and byte values live in a shared [`Buf`]. [`ValueBox::copy`] duplicates the storage,
//! [`ValueBox::copy_shallow`] shares it, and [`ValueBox::steal`] moves it out of the source box.
//! Multi-valued attributes are plain `Vec<ValueBox>`.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::collections::TryReserveError;
use std::sync::{Arc, Weak};

use smallvec::SmallVec;

pub mod buf;
pub mod cast;
pub mod cmp;
pub mod dict;
pub mod escape;
pub mod network;
pub mod pairs;
pub mod parse;
pub mod print;
pub mod strerror;
pub mod types;

pub use buf::Buf;
pub use cmp::Op;
pub use dict::EnumTable;
pub use escape::unescape;
pub use network::Encoded;
pub use pairs::AttrValPair;
pub use types::{FrType, UNBOUNDED};

/// An IP address with its prefix length and, for IPv6, a scope id.
///
/// Host addresses carry the family's full prefix (32 or 128).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InetAddr {
    /// The address itself.
    pub addr: IpAddr,
    /// Prefix length in bits.
    pub prefix: u8,
    /// IPv6 scope (interface) id. Always zero for IPv4.
    pub scope_id: u32,
}

impl InetAddr {
    /// IPv4 address or prefix.
    pub const fn v4(addr: Ipv4Addr, prefix: u8) -> Self {
        Self { addr: IpAddr::V4(addr), prefix, scope_id: 0 }
    }

    /// IPv6 address or prefix.
    pub const fn v6(addr: Ipv6Addr, prefix: u8, scope_id: u32) -> Self {
        Self { addr: IpAddr::V6(addr), prefix, scope_id }
    }

    /// Full prefix length of the address family.
    pub const fn max_prefix(&self) -> u8 {
        match self.addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        }
    }

    /// The address if it belongs to the wanted family and its prefix fits that family.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::IncompatibleFamilies`] | IPv6 address where IPv4 is wanted, or the reverse |
    /// | [`ValueErr::InvalidPrefix`] | Prefix longer than 32 or 128 bits |
    pub fn checked(&self, v6: bool) -> Result<&Self, ValueErr> {
        if matches!(self.addr, IpAddr::V6(_)) != v6 {
            return Err(ValueErr::IncompatibleFamilies);
        }
        if self.prefix > self.max_prefix() {
            return Err(ValueErr::InvalidPrefix(if v6 { "Invalid IPv6 prefix length" } else { "Invalid IPv4 prefix length" }));
        }
        Ok(self)
    }

    /// True if the prefix covers the whole address.
    pub const fn is_host(&self) -> bool {
        self.prefix == self.max_prefix()
    }

    /// Address bytes in network order.
    pub fn octets(&self) -> SmallVec<[u8; 16]> {
        match self.addr {
            IpAddr::V4(a) => SmallVec::from_slice(&a.octets()),
            IpAddr::V6(a) => SmallVec::from_slice(&a.octets()),
        }
    }

    /// The address with every bit past the prefix cleared.
    pub fn masked(&self) -> Self {
        let addr = match self.addr {
            IpAddr::V4(a) => {
                let bits = u32::from(a);
                let mask = u32::MAX.checked_shl(32 - u32::from(self.prefix.min(32))).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(bits & mask))
            }
            IpAddr::V6(a) => {
                let bits = u128::from(a);
                let mask = u128::MAX.checked_shl(128 - u32::from(self.prefix.min(128))).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(bits & mask))
            }
        };
        Self { addr, ..*self }
    }

    /// The embedded IPv4 address if this is an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
    pub fn v4_mapped(&self) -> Option<Ipv4Addr> {
        match self.addr {
            IpAddr::V6(a) => a.to_ipv4_mapped(),
            IpAddr::V4(_) => None,
        }
    }
}

/// Seconds plus microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeval {
    /// Whole seconds.
    pub sec: i64,
    /// Microseconds, `0..1_000_000`.
    pub usec: u32,
}

/// The payload of a [`ValueBox`]. One variant per concrete [`FrType`].
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub enum Datum {
    /// No value.
    #[default]
    Invalid,
    Str(Buf),
    Octets(Buf),
    Ipv4Addr(InetAddr),
    Ipv4Prefix(InetAddr),
    Ipv6Addr(InetAddr),
    Ipv6Prefix(InetAddr),
    Ifid([u8; 8]),
    Ethernet([u8; 6]),
    Bool(bool),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Date(u32),
    DateMilliseconds(u64),
    DateMicroseconds(u64),
    DateNanoseconds(u64),
    Size(usize),
    Timeval(Timeval),
    Abinary(Buf),
}

impl Datum {
    /// Tag of this payload.
    pub const fn ty(&self) -> FrType {
        match self {
            Self::Invalid => FrType::Invalid,
            Self::Str(_) => FrType::String,
            Self::Octets(_) => FrType::Octets,
            Self::Ipv4Addr(_) => FrType::Ipv4Addr,
            Self::Ipv4Prefix(_) => FrType::Ipv4Prefix,
            Self::Ipv6Addr(_) => FrType::Ipv6Addr,
            Self::Ipv6Prefix(_) => FrType::Ipv6Prefix,
            Self::Ifid(_) => FrType::Ifid,
            Self::Ethernet(_) => FrType::Ethernet,
            Self::Bool(_) => FrType::Bool,
            Self::Uint8(_) => FrType::Uint8,
            Self::Uint16(_) => FrType::Uint16,
            Self::Uint32(_) => FrType::Uint32,
            Self::Uint64(_) => FrType::Uint64,
            Self::Int8(_) => FrType::Int8,
            Self::Int16(_) => FrType::Int16,
            Self::Int32(_) => FrType::Int32,
            Self::Int64(_) => FrType::Int64,
            Self::Float32(_) => FrType::Float32,
            Self::Float64(_) => FrType::Float64,
            Self::Date(_) => FrType::Date,
            Self::DateMilliseconds(_) => FrType::DateMilliseconds,
            Self::DateMicroseconds(_) => FrType::DateMicroseconds,
            Self::DateNanoseconds(_) => FrType::DateNanoseconds,
            Self::Size(_) => FrType::Size,
            Self::Timeval(_) => FrType::Timeval,
            Self::Abinary(_) => FrType::Abinary,
        }
    }

    /// The zero value of `ty`. Structural and parse-only tags give [`Datum::Invalid`].
    pub fn zeroed(ty: FrType) -> Self {
        match ty {
            FrType::String => Self::Str(Buf::empty_str()),
            FrType::Octets => Self::Octets(Buf::empty()),
            FrType::Ipv4Addr => Self::Ipv4Addr(InetAddr::v4(Ipv4Addr::UNSPECIFIED, 32)),
            FrType::Ipv4Prefix => Self::Ipv4Prefix(InetAddr::v4(Ipv4Addr::UNSPECIFIED, 32)),
            FrType::Ipv6Addr => Self::Ipv6Addr(InetAddr::v6(Ipv6Addr::UNSPECIFIED, 128, 0)),
            FrType::Ipv6Prefix => Self::Ipv6Prefix(InetAddr::v6(Ipv6Addr::UNSPECIFIED, 128, 0)),
            FrType::Ifid => Self::Ifid([0; 8]),
            FrType::Ethernet => Self::Ethernet([0; 6]),
            FrType::Bool => Self::Bool(false),
            FrType::Uint8 => Self::Uint8(0),
            FrType::Uint16 => Self::Uint16(0),
            FrType::Uint32 => Self::Uint32(0),
            FrType::Uint64 => Self::Uint64(0),
            FrType::Int8 => Self::Int8(0),
            FrType::Int16 => Self::Int16(0),
            FrType::Int32 => Self::Int32(0),
            FrType::Int64 => Self::Int64(0),
            FrType::Float32 => Self::Float32(0.0),
            FrType::Float64 => Self::Float64(0.0),
            FrType::Date => Self::Date(0),
            FrType::DateMilliseconds => Self::DateMilliseconds(0),
            FrType::DateMicroseconds => Self::DateMicroseconds(0),
            FrType::DateNanoseconds => Self::DateNanoseconds(0),
            FrType::Size => Self::Size(0),
            FrType::Timeval => Self::Timeval(Timeval::default()),
            FrType::Abinary => Self::Abinary(Buf::empty()),
            FrType::Invalid
            | FrType::ComboIpAddr
            | FrType::ComboIpPrefix
            | FrType::Tlv
            | FrType::Struct
            | FrType::Extended
            | FrType::LongExtended
            | FrType::Evs
            | FrType::Vsa
            | FrType::Vendor => Self::Invalid,
        }
    }

    /// The buffer of a variable length payload.
    pub fn buf(&self) -> Option<&Buf> {
        match self {
            Self::Str(b) | Self::Octets(b) | Self::Abinary(b) => Some(b),
            _ => None,
        }
    }

    /// The address of an IP payload.
    pub fn inet(&self) -> Option<&InetAddr> {
        match self {
            Self::Ipv4Addr(a) | Self::Ipv4Prefix(a) | Self::Ipv6Addr(a) | Self::Ipv6Prefix(a) => Some(a),
            _ => None,
        }
    }
}

/// A single typed value with provenance and alias metadata.
///
/// `Clone` is a shallow copy: buffers are shared, not duplicated. Equality compares payloads
/// only, ignoring `tainted` and the alias table.
#[derive(Clone, Debug, Default)]
pub struct ValueBox {
    datum: Datum,
    /// True if the value came from an untrusted source and has not been validated.
    pub tainted: bool,
    enumv: Option<Weak<EnumTable>>,
}

impl PartialEq for ValueBox {
    fn eq(&self, other: &Self) -> bool {
        self.datum == other.datum
    }
}

impl From<Datum> for ValueBox {
    fn from(datum: Datum) -> Self {
        Self::new(datum)
    }
}

impl ValueBox {
    /// Wrap a payload. The result is untainted and has no alias table.
    pub fn new(datum: Datum) -> Self {
        Self { datum, tainted: false, enumv: None }
    }

    /// A zero value of `ty`.
    ///
    /// Structural tags produce an invalid box.
    pub fn alloc(ty: FrType) -> Self {
        Self::new(Datum::zeroed(ty))
    }

    /// Tag of the current payload.
    pub fn ty(&self) -> FrType {
        self.datum.ty()
    }

    /// The payload.
    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    /// Consume the box, returning its payload.
    pub fn into_datum(self) -> Datum {
        self.datum
    }

    /// True if the box holds no value.
    pub fn is_invalid(&self) -> bool {
        matches!(self.datum, Datum::Invalid)
    }

    /// The alias table attached to this value, if it is still alive.
    pub fn enumv(&self) -> Option<Arc<EnumTable>> {
        self.enumv.as_ref().and_then(Weak::upgrade)
    }

    /// Attach (or detach) an alias table. Only a weak reference is kept.
    pub fn set_enumv(&mut self, enumv: Option<&Arc<EnumTable>>) {
        self.enumv = enumv.map(Arc::downgrade);
    }

    pub(crate) fn with_meta(datum: Datum, tainted: bool, enumv: Option<&Arc<EnumTable>>) -> Self {
        Self { datum, tainted, enumv: enumv.map(Arc::downgrade) }
    }

    /// Bytes of a string, octets or abinary value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.datum.buf().map(Buf::as_bytes)
    }

    /// Text of a string value.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::InvalidCast`] | The box is not a string |
    /// | [`ValueErr::Utf8ConversionError`] | The bytes are not valid UTF-8 |
    pub fn as_str(&self) -> Result<&str, ValueErr> {
        match &self.datum {
            Datum::Str(b) => Ok(core::str::from_utf8(b.as_bytes())?),
            other => Err(ValueErr::InvalidCast { src: other.ty(), dst: FrType::String, reason: None }),
        }
    }

    /// Release any buffer and reset to the invalid state.
    ///
    /// Clearing an invalid box does nothing.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Deep copy. Buffers are duplicated, metadata is copied verbatim.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if a buffer could not be duplicated.
    pub fn copy(&self) -> Result<Self, ValueErr> {
        let datum = match &self.datum {
            Datum::Str(b) => Datum::Str(strerror::track(Buf::duplicate_str(b.as_bytes()))?),
            Datum::Octets(b) => Datum::Octets(strerror::track(Buf::duplicate(b.as_bytes()))?),
            Datum::Abinary(b) => Datum::Abinary(strerror::track(Buf::duplicate(b.as_bytes()))?),
            other => other.clone(),
        };
        Ok(Self { datum, tainted: self.tainted, enumv: self.enumv.clone() })
    }

    /// Shallow copy. Buffers are shared with `self`.
    pub fn copy_shallow(&self) -> Self {
        self.clone()
    }

    /// Move the value out of `src`.
    ///
    /// Buffer backed values leave `src` invalid. Fixed width values are copied and `src` is left
    /// untouched.
    pub fn steal(src: &mut ValueBox) -> Self {
        if src.ty().is_variable_size() {
            core::mem::take(src)
        } else {
            src.clone()
        }
    }

    /// String from UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the buffer could not be allocated.
    pub fn strdup(src: &str, tainted: bool) -> Result<Self, ValueErr> {
        Self::bstrndup(src.as_bytes(), tainted)
    }

    /// String from arbitrary bytes. Embedded `\0` bytes are kept.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the buffer could not be allocated.
    pub fn bstrndup(src: &[u8], tainted: bool) -> Result<Self, ValueErr> {
        let buf = strerror::track(Buf::duplicate_str(src))?;
        Ok(Self::with_meta(Datum::Str(buf), tainted, None))
    }

    /// String duplicated from a terminated buffer.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::NotTerminated`] | `src` has no hidden terminator |
    /// | [`ValueErr::AllocError`] | The buffer could not be allocated |
    pub fn strdup_buffer(src: &Buf, tainted: bool) -> Result<Self, ValueErr> {
        if !src.is_terminated() {
            return strerror::track(Err(ValueErr::NotTerminated));
        }
        Self::bstrndup(src.as_bytes(), tainted)
    }

    /// String taking ownership of a `\0` terminated vector without copying it.
    ///
    /// # Errors
    ///
    /// [`ValueErr::NotTerminated`] if the last byte is not `\0`.
    pub fn strsteal(src: Vec<u8>, tainted: bool) -> Result<Self, ValueErr> {
        let buf = strerror::track(Buf::transfer_str(src))?;
        Ok(Self::with_meta(Datum::Str(buf), tainted, None))
    }

    /// String sharing a terminated buffer.
    ///
    /// # Errors
    ///
    /// [`ValueErr::NotTerminated`] if `src` has no hidden terminator.
    pub fn strdup_buffer_shallow(src: &Buf, tainted: bool) -> Result<Self, ValueErr> {
        if !src.is_terminated() {
            return strerror::track(Err(ValueErr::NotTerminated));
        }
        Ok(Self::with_meta(Datum::Str(src.add_reference()), tainted, None))
    }

    /// Octets duplicated from `src`.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the buffer could not be allocated.
    pub fn memdup(src: &[u8], tainted: bool) -> Result<Self, ValueErr> {
        let buf = strerror::track(Buf::duplicate(src))?;
        Ok(Self::with_meta(Datum::Octets(buf), tainted, None))
    }

    /// Octets duplicated from an existing buffer.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the buffer could not be allocated.
    pub fn memdup_buffer(src: &Buf, tainted: bool) -> Result<Self, ValueErr> {
        Self::memdup(src.as_bytes(), tainted)
    }

    /// Octets taking ownership of `src`.
    pub fn memsteal(src: Vec<u8>, tainted: bool) -> Self {
        Self::with_meta(Datum::Octets(Buf::transfer(src)), tainted, None)
    }

    /// Octets sharing an existing buffer.
    pub fn memdup_buffer_shallow(src: &Buf, tainted: bool) -> Self {
        Self::with_meta(Datum::Octets(src.add_reference()), tainted, None)
    }

    /// Address or prefix box from an [`InetAddr`].
    ///
    /// A full-width prefix gives `ipaddr`/`ipv6addr`, anything shorter gives the prefix type.
    ///
    /// # Errors
    ///
    /// [`ValueErr::InvalidPrefix`] if the prefix is longer than the family allows.
    pub fn from_ipaddr(ipaddr: &InetAddr, tainted: bool) -> Result<Self, ValueErr> {
        let v6 = matches!(ipaddr.addr, IpAddr::V6(_));
        strerror::track(ipaddr.checked(v6))?;
        let datum = match ipaddr.addr {
            IpAddr::V4(_) if ipaddr.prefix == 32 => Datum::Ipv4Addr(*ipaddr),
            IpAddr::V4(_) => Datum::Ipv4Prefix(*ipaddr),
            IpAddr::V6(_) if ipaddr.prefix == 128 => Datum::Ipv6Addr(*ipaddr),
            IpAddr::V6(_) => Datum::Ipv6Prefix(*ipaddr),
        };
        Ok(Self::with_meta(datum, tainted, None))
    }
}

/// Errors produced by value box operations.
///
/// The `Display` text of every variant is also what lands in [`strerror::last_error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueErr {
    /// Two values of different types were compared.
    TypeMismatch {
        /// Type of the left operand
        a: FrType,
        /// Type of the right operand
        b: FrType,
    },
    /// The operation has no definition for this type.
    UnsupportedType {
        /// What was being attempted, e.g. `encode`
        op: &'static str,
        /// Offending type
        ty: FrType,
    },
    /// The type exists in dictionaries but has no value form on the wire.
    NotAValue(FrType),
    /// No conversion rule from `src` to `dst`, or the value does not survive the conversion.
    InvalidCast {
        /// Source type
        src: FrType,
        /// Destination type
        dst: FrType,
        /// Extra detail about why the value was rejected
        reason: Option<String>,
    },
    /// Presentation text could not be parsed.
    ParseError(String),
    /// A parsed integer does not fit the destination type.
    OutOfRange {
        /// Parsed value
        value: i128,
        /// Destination type
        ty: FrType,
        /// Smallest accepted value
        min: i128,
        /// Largest accepted value
        max: i128,
    },
    /// Wire data shorter than the type's minimum.
    Truncated {
        /// Type being decoded
        ty: FrType,
        /// Minimum length
        expected: usize,
        /// Length given
        got: usize,
    },
    /// Wire data longer than the type's maximum.
    TrailingGarbage {
        /// Type being decoded
        ty: FrType,
        /// Maximum length
        expected: usize,
        /// Length given
        got: usize,
    },
    /// A buffer expected to carry a hidden terminator did not.
    NotTerminated,
    /// Memory allocation failed.
    AllocError(&'static str),
    /// String bytes are not UTF-8.
    Utf8ConversionError(core::str::Utf8Error),
    /// IPv4 and IPv6 values were compared.
    IncompatibleFamilies,
    /// Prefix length out of range for the family.
    InvalidPrefix(&'static str),
}

impl core::fmt::Display for ValueErr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TypeMismatch { a, b } =>
                write!(f, "Can't compare values of different types {a} and {b}"),
            Self::UnsupportedType { op, ty } =>
                write!(f, "Cannot {op} type \"{ty}\""),
            Self::NotAValue(ty) =>
                write!(f, "Cannot decode type \"{ty}\" - Is not a value"),
            Self::InvalidCast { src, dst, reason: None } =>
                write!(f, "Invalid cast from {src} to {dst}"),
            Self::InvalidCast { src, dst, reason: Some(r) } =>
                write!(f, "Invalid cast from {src} to {dst}.  {r}"),
            Self::ParseError(msg) =>
                f.write_str(msg),
            Self::OutOfRange { value, ty, min, max } =>
                write!(f, "Value {value} is invalid for type {ty} (must be in range {min}-{max})"),
            Self::Truncated { ty, expected, got } =>
                write!(f, "Got truncated value parsing type \"{ty}\". Expected length >= {expected} bytes, got {got} bytes"),
            Self::TrailingGarbage { ty, expected, got } =>
                write!(f, "Found trailing garbage parsing type \"{ty}\". Expected length <= {expected} bytes, got {got} bytes"),
            Self::NotTerminated =>
                f.write_str("Input buffer not \\0 terminated"),
            Self::AllocError(d) =>
                write!(f, "allocation failure: {d}"),
            Self::Utf8ConversionError(inner) =>
                inner.fmt(f),
            Self::IncompatibleFamilies =>
                f.write_str("Cannot compare IPv4 with IPv6 address"),
            Self::InvalidPrefix(d) =>
                f.write_str(d),
        }
    }
}

impl core::error::Error for ValueErr {}

impl From<core::str::Utf8Error> for ValueErr {
    fn from(value: core::str::Utf8Error) -> Self {
        Self::Utf8ConversionError(value)
    }
}

impl<S, D> From<zerocopy::error::SizeError<S, D>> for ValueErr {
    fn from(_value: zerocopy::error::SizeError<S, D>) -> Self {
        Self::ParseError("wire size error".to_owned())
    }
}

impl From<TryReserveError> for ValueErr {
    fn from(_: TryReserveError) -> Self {
        Self::AllocError("buffer reservation failed")
    }
}
