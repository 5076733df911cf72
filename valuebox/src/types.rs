//! Type tags and their per-type metadata.
//!
//! Every [`FrType`] carries a fixed record: its dictionary name, the `(min, max)` byte bounds of
//! its network encoding, and the byte width of its in-memory payload. These are `const fn`
//! lookups, so there is no table to index out of range.

use core::fmt;
use core::mem::size_of;

use crate::{InetAddr, Timeval, ValueErr};

/// Network size bound used for variable length types.
pub const UNBOUNDED: usize = usize::MAX;

/// Discriminant of a [`ValueBox`](crate::ValueBox).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrType {
    /// No value. Boxes in this state carry no payload.
    Invalid = 0,
    /// Printable text, stored with a hidden terminator.
    String,
    /// Opaque binary data.
    Octets,
    /// IPv4 host address.
    Ipv4Addr,
    /// IPv4 network prefix.
    Ipv4Prefix,
    /// IPv6 host address.
    Ipv6Addr,
    /// IPv6 network prefix.
    Ipv6Prefix,
    /// IPv6 interface identifier (8 bytes).
    Ifid,
    /// IPv4 or IPv6 address. Only valid as a parse target.
    ComboIpAddr,
    /// IPv4 or IPv6 prefix. Only valid as a parse target.
    ComboIpPrefix,
    /// 48 bit Ethernet address.
    Ethernet,
    /// Boolean.
    Bool,
    /// Unsigned 8 bit integer.
    Uint8,
    /// Unsigned 16 bit integer.
    Uint16,
    /// Unsigned 32 bit integer.
    Uint32,
    /// Unsigned 64 bit integer.
    Uint64,
    /// Signed 8 bit integer.
    Int8,
    /// Signed 16 bit integer.
    Int16,
    /// Signed 32 bit integer.
    Int32,
    /// Signed 64 bit integer.
    Int64,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// Seconds since the epoch, 32 bit.
    Date,
    /// Milliseconds since the epoch.
    DateMilliseconds,
    /// Microseconds since the epoch.
    DateMicroseconds,
    /// Nanoseconds since the epoch.
    DateNanoseconds,
    /// A file or memory size. Host width, not encodable.
    Size,
    /// Seconds and microseconds. Not encodable.
    Timeval,
    /// Ascend binary filter blob. Not encodable.
    Abinary,
    /// Type-length-value container.
    Tlv,
    /// Fixed layout structure.
    Struct,
    /// Extended attribute container.
    Extended,
    /// Long extended attribute container.
    LongExtended,
    /// Extended vendor specific container.
    Evs,
    /// Vendor specific container.
    Vsa,
    /// Vendor container.
    Vendor,
}

impl FrType {
    /// Every tag in discriminant order.
    pub const ALL: [FrType; 36] = [
        Self::Invalid, Self::String, Self::Octets, Self::Ipv4Addr, Self::Ipv4Prefix,
        Self::Ipv6Addr, Self::Ipv6Prefix, Self::Ifid, Self::ComboIpAddr, Self::ComboIpPrefix,
        Self::Ethernet, Self::Bool, Self::Uint8, Self::Uint16, Self::Uint32, Self::Uint64,
        Self::Int8, Self::Int16, Self::Int32, Self::Int64, Self::Float32, Self::Float64,
        Self::Date, Self::DateMilliseconds, Self::DateMicroseconds, Self::DateNanoseconds,
        Self::Size, Self::Timeval, Self::Abinary, Self::Tlv, Self::Struct, Self::Extended,
        Self::LongExtended, Self::Evs, Self::Vsa, Self::Vendor,
    ];

    /// Dictionary name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::String => "string",
            Self::Octets => "octets",
            Self::Ipv4Addr => "ipaddr",
            Self::Ipv4Prefix => "ipv4prefix",
            Self::Ipv6Addr => "ipv6addr",
            Self::Ipv6Prefix => "ipv6prefix",
            Self::Ifid => "ifid",
            Self::ComboIpAddr => "combo-ip",
            Self::ComboIpPrefix => "combo-prefix",
            Self::Ethernet => "ether",
            Self::Bool => "bool",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Date => "date",
            Self::DateMilliseconds => "date_milliseconds",
            Self::DateMicroseconds => "date_microseconds",
            Self::DateNanoseconds => "date_nanoseconds",
            Self::Size => "size",
            Self::Timeval => "timeval",
            Self::Abinary => "abinary",
            Self::Tlv => "tlv",
            Self::Struct => "struct",
            Self::Extended => "extended",
            Self::LongExtended => "long-extended",
            Self::Evs => "evs",
            Self::Vsa => "vsa",
            Self::Vendor => "vendor",
        }
    }

    /// Look a type up by its dictionary name. `ipv4addr` is accepted as an alias of `ipaddr`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "ipv4addr" {
            return Some(Self::Ipv4Addr);
        }
        Self::ALL.iter().copied().find(|ty| ty.name() == name)
    }

    /// Inclusive `(min, max)` byte length of the network encoding.
    ///
    /// Variable length types report `(0, UNBOUNDED)`. Types with no network form report `(0, 0)`.
    pub const fn network_bounds(self) -> (usize, usize) {
        match self {
            Self::String | Self::Octets => (0, UNBOUNDED),
            Self::Ipv4Addr => (4, 4),
            Self::Ipv4Prefix => (5, 5),
            Self::Ipv6Addr => (16, 16),
            Self::Ipv6Prefix => (18, 18),
            Self::Ifid => (8, 8),
            Self::Ethernet => (6, 6),
            Self::Bool | Self::Uint8 | Self::Int8 => (1, 1),
            Self::Uint16 | Self::Int16 => (2, 2),
            Self::Uint32 | Self::Int32 | Self::Float32 | Self::Date => (4, 4),
            Self::Uint64
            | Self::Int64
            | Self::Float64
            | Self::DateMilliseconds
            | Self::DateMicroseconds
            | Self::DateNanoseconds => (8, 8),
            Self::Abinary => (32, UNBOUNDED),
            Self::Invalid
            | Self::ComboIpAddr
            | Self::ComboIpPrefix
            | Self::Size
            | Self::Timeval
            | Self::Tlv
            | Self::Struct
            | Self::Extended
            | Self::LongExtended
            | Self::Evs
            | Self::Vsa
            | Self::Vendor => (0, 0),
        }
    }

    /// Byte width of the in-memory payload. Zero for buffer backed and structural types.
    pub const fn field_size(self) -> usize {
        match self {
            Self::Ipv4Addr | Self::Ipv4Prefix | Self::Ipv6Addr | Self::Ipv6Prefix => size_of::<InetAddr>(),
            Self::Ifid => 8,
            Self::Ethernet => 6,
            Self::Bool | Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 | Self::Date => 4,
            Self::Uint64
            | Self::Int64
            | Self::Float64
            | Self::DateMilliseconds
            | Self::DateMicroseconds
            | Self::DateNanoseconds => 8,
            Self::Size => size_of::<usize>(),
            Self::Timeval => size_of::<Timeval>(),
            Self::Invalid
            | Self::String
            | Self::Octets
            | Self::Abinary
            | Self::ComboIpAddr
            | Self::ComboIpPrefix
            | Self::Tlv
            | Self::Struct
            | Self::Extended
            | Self::LongExtended
            | Self::Evs
            | Self::Vsa
            | Self::Vendor => 0,
        }
    }

    /// True for types backed by a length delimited buffer.
    pub const fn is_variable_size(self) -> bool {
        matches!(self, Self::String | Self::Octets | Self::Abinary)
    }

    /// True for container types that never hold a scalar value.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Invalid
                | Self::Tlv
                | Self::Struct
                | Self::Extended
                | Self::LongExtended
                | Self::Evs
                | Self::Vsa
                | Self::Vendor
        )
    }

    /// True if the type can be written by [`ValueBox::to_network`](crate::ValueBox::to_network).
    pub const fn is_network_encodable(self) -> bool {
        self.network_bounds().1 != 0 && !matches!(self, Self::Abinary)
    }

    /// True for the integer types.
    pub const fn is_integer(self) -> bool {
        self.is_unsigned() || self.is_signed()
    }

    /// True for the unsigned integer types.
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64)
    }

    /// True for the signed integer types.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// True for address and prefix types of either family.
    pub const fn is_ip(self) -> bool {
        matches!(self, Self::Ipv4Addr | Self::Ipv4Prefix | Self::Ipv6Addr | Self::Ipv6Prefix)
    }
}

const _: () = assert!(FrType::ALL.len() == FrType::Vendor as usize + 1);

impl fmt::Display for FrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for FrType {
    type Error = ValueErr;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_name(value).ok_or_else(|| ValueErr::ParseError(format!("Unknown data type \"{value}\"")))
    }
}

impl core::str::FromStr for FrType {
    type Err = ValueErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}
