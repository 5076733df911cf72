//! Ordering and relational operators.
//!
//! [`ValueBox::compare`] is a total order within one type. [`ValueBox::compare_op`] applies a
//! relational [`Op`], switching to containment semantics when either side is an IP prefix.

use core::cmp::Ordering;
use core::fmt;

use crate::{strerror, Datum, FrType, InetAddr, ValueBox, ValueErr};

/// Relational operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Op {
    /// Every operator, longest tokens first so prefix scanning is unambiguous.
    pub const ALL: [Op; 6] = [Op::Eq, Op::Ne, Op::Le, Op::Ge, Op::Lt, Op::Gt];

    /// Presentation token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Whether `ordering` (left compared to right) satisfies the operator.
    pub const fn apply(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Lt => ordering.is_lt(),
            Self::Le => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Ge => ordering.is_ge(),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Op {
    type Error = ValueErr;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "==" | "=" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            _ => Err(ValueErr::ParseError(format!("Invalid operator \"{value}\""))),
        }
    }
}

impl core::str::FromStr for Op {
    type Err = ValueErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Pull the payload of variant `$variant` out of a datum already known to have that type.
macro_rules! same {
    ($datum:expr, $variant:ident) => {
        match $datum {
            Datum::$variant(v) => v,
            _ => unreachable!("type equality checked before dispatch"),
        }
    };
}

fn cmp_inet(a: &InetAddr, b: &InetAddr) -> Ordering {
    a.octets()
        .cmp(&b.octets())
        .then(a.prefix.cmp(&b.prefix))
        .then(a.scope_id.cmp(&b.scope_id))
}

fn cmp_float<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

impl ValueBox {
    /// Three way comparison of two values of the same type.
    ///
    /// Text and octets compare bytewise over the shared prefix, then by length, so `0x00` sorts
    /// before `0x0000`. Numbers compare numerically (unordered floats compare equal). Addresses
    /// compare by address bytes, then prefix, then scope.
    ///
    /// # Errors
    ///
    /// [`ValueErr::TypeMismatch`] if the types differ.
    ///
    /// # Panics
    ///
    /// If either box is invalid.
    pub fn compare(&self, other: &ValueBox) -> Result<Ordering, ValueErr> {
        assert!(!self.is_invalid() && !other.is_invalid(), "compare on an invalid value box");
        if self.ty() != other.ty() {
            return strerror::track(Err(ValueErr::TypeMismatch { a: self.ty(), b: other.ty() }));
        }
        let b = &other.datum;
        let ord = match &self.datum {
            Datum::Invalid => unreachable!("checked above"),
            Datum::Str(a) => a.as_bytes().cmp(same!(b, Str).as_bytes()),
            Datum::Octets(a) => a.as_bytes().cmp(same!(b, Octets).as_bytes()),
            Datum::Abinary(a) => a.as_bytes().cmp(same!(b, Abinary).as_bytes()),
            Datum::Ipv4Addr(a) => cmp_inet(a, same!(b, Ipv4Addr)),
            Datum::Ipv4Prefix(a) => cmp_inet(a, same!(b, Ipv4Prefix)),
            Datum::Ipv6Addr(a) => cmp_inet(a, same!(b, Ipv6Addr)),
            Datum::Ipv6Prefix(a) => cmp_inet(a, same!(b, Ipv6Prefix)),
            Datum::Ifid(a) => a.cmp(same!(b, Ifid)),
            Datum::Ethernet(a) => a.cmp(same!(b, Ethernet)),
            Datum::Bool(a) => a.cmp(same!(b, Bool)),
            Datum::Uint8(a) => a.cmp(same!(b, Uint8)),
            Datum::Uint16(a) => a.cmp(same!(b, Uint16)),
            Datum::Uint32(a) => a.cmp(same!(b, Uint32)),
            Datum::Uint64(a) => a.cmp(same!(b, Uint64)),
            Datum::Int8(a) => a.cmp(same!(b, Int8)),
            Datum::Int16(a) => a.cmp(same!(b, Int16)),
            Datum::Int32(a) => a.cmp(same!(b, Int32)),
            Datum::Int64(a) => a.cmp(same!(b, Int64)),
            Datum::Float32(a) => cmp_float(a, same!(b, Float32)),
            Datum::Float64(a) => cmp_float(a, same!(b, Float64)),
            Datum::Date(a) => a.cmp(same!(b, Date)),
            Datum::DateMilliseconds(a) => a.cmp(same!(b, DateMilliseconds)),
            Datum::DateMicroseconds(a) => a.cmp(same!(b, DateMicroseconds)),
            Datum::DateNanoseconds(a) => a.cmp(same!(b, DateNanoseconds)),
            Datum::Size(a) => a.cmp(same!(b, Size)),
            Datum::Timeval(a) => a.cmp(same!(b, Timeval)),
        };
        Ok(ord)
    }

    /// Evaluate `a op b`.
    ///
    /// When either side is an IP prefix of the same family as the other, the comparison is
    /// about containment rather than ordering:
    ///
    /// | Expression | Meaning |
    /// |------------|---------|
    /// | `a == b` | same prefix length and same network |
    /// | `a != b` | different prefix length, or different network |
    /// | `a < b` | `a` is strictly inside `b` |
    /// | `a <= b` | `a` is inside or equal to `b` |
    /// | `a > b` | `a` strictly contains `b` |
    /// | `a >= b` | `a` contains or equals `b` |
    ///
    /// Host addresses act as prefixes of full width.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::IncompatibleFamilies`] | IPv4 compared with IPv6 |
    /// | [`ValueErr::TypeMismatch`] | Any other pair of different types |
    pub fn compare_op(op: Op, a: &ValueBox, b: &ValueBox) -> Result<bool, ValueErr> {
        use Datum::*;

        let res = match (&a.datum, &b.datum) {
            (Ipv4Addr(_), Ipv4Addr(_)) | (Ipv6Addr(_), Ipv6Addr(_)) => a.compare(b).map(|o| op.apply(o)),

            (Ipv4Addr(x) | Ipv4Prefix(x), Ipv4Addr(y) | Ipv4Prefix(y)) => cidr_checked(op, x, y, false),
            (Ipv6Addr(x) | Ipv6Prefix(x), Ipv6Addr(y) | Ipv6Prefix(y)) => cidr_checked(op, x, y, true),

            (Ipv4Addr(_) | Ipv4Prefix(_), Ipv6Addr(_) | Ipv6Prefix(_))
            | (Ipv6Addr(_) | Ipv6Prefix(_), Ipv4Addr(_) | Ipv4Prefix(_)) => Err(ValueErr::IncompatibleFamilies),

            _ => a.compare(b).map(|o| op.apply(o)),
        };
        strerror::track(res)
    }
}

fn cidr_checked(op: Op, x: &InetAddr, y: &InetAddr, v6: bool) -> Result<bool, ValueErr> {
    let (x, y) = (x.checked(v6)?, y.checked(v6)?);
    Ok(cidr_cmp_op(op, x.prefix, &x.octets(), y.prefix, &y.octets()))
}

/// Containment test between two networks of the same family.
fn cidr_cmp_op(op: Op, a_net: u8, a: &[u8], b_net: u8, b: &[u8]) -> bool {
    if a_net == b_net {
        let equal = a == b;
        return match op {
            Op::Eq | Op::Le | Op::Ge => equal,
            Op::Ne => !equal,
            Op::Lt | Op::Gt => false,
        };
    }

    match op {
        Op::Eq => return false,
        Op::Ne => return true,
        // 192/8 < 192.168/16 is false
        Op::Lt | Op::Le if a_net < b_net => return false,
        // 192.168/16 > 192/8 is false
        Op::Gt | Op::Ge if a_net > b_net => return false,
        _ => {}
    }

    let common = usize::from(a_net.min(b_net)).min(a.len() * 8);
    let whole = common / 8;
    if a[..whole] != b[..whole] {
        return false;
    }
    let bits = common % 8;
    if bits == 0 {
        return true;
    }
    let mask = 0xffu8 << (8 - bits);
    (a[whole] & mask) == (b[whole] & mask)
}

/// True if `ty` values can take part in [`ValueBox::compare`].
pub fn is_comparable(ty: FrType) -> bool {
    !ty.is_structural() && !matches!(ty, FrType::ComboIpAddr | FrType::ComboIpPrefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buf, Timeval};
    use core::net::{Ipv4Addr, Ipv6Addr};

    fn v4p(a: [u8; 4], p: u8) -> ValueBox {
        ValueBox::new(Datum::Ipv4Prefix(InetAddr::v4(Ipv4Addr::from(a), p)))
    }

    fn v4(a: [u8; 4]) -> ValueBox {
        ValueBox::new(Datum::Ipv4Addr(InetAddr::v4(Ipv4Addr::from(a), 32)))
    }

    #[test]
    fn cidr_rejects_mismatched_payloads() {
        let bad = ValueBox::new(Datum::Ipv4Prefix(InetAddr::v6(Ipv6Addr::LOCALHOST, 64, 0)));
        let net = ValueBox::new(Datum::Ipv4Prefix(InetAddr::v4(Ipv4Addr::new(10, 0, 0, 0), 8)));
        assert_eq!(ValueBox::compare_op(Op::Lt, &bad, &net), Err(ValueErr::IncompatibleFamilies));
        assert_eq!(ValueBox::compare_op(Op::Ge, &net, &bad), Err(ValueErr::IncompatibleFamilies));
    }

    #[test]
    fn bytes_then_length() {
        let short = ValueBox::new(Datum::Octets(Buf::duplicate(&[0]).unwrap()));
        let long = ValueBox::new(Datum::Octets(Buf::duplicate(&[0, 0]).unwrap()));
        assert_eq!(short.compare(&long), Ok(Ordering::Less));
        assert_eq!(long.compare(&short), Ok(Ordering::Greater));
        let a = ValueBox::strdup("abc", false).unwrap();
        let b = ValueBox::strdup("abd", false).unwrap();
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(a.compare(&a.copy().unwrap()), Ok(Ordering::Equal));
    }

    #[test]
    fn same_width_unsigned() {
        let a = ValueBox::new(Datum::Uint16(0x0100));
        let b = ValueBox::new(Datum::Uint16(0x00ff));
        assert_eq!(a.compare(&b), Ok(Ordering::Greater));
        let c = ValueBox::new(Datum::Uint32(0x8000_0000));
        let d = ValueBox::new(Datum::Uint32(1));
        assert_eq!(c.compare(&d), Ok(Ordering::Greater));
    }

    #[test]
    fn signed_and_float() {
        let a = ValueBox::new(Datum::Int32(-5));
        let b = ValueBox::new(Datum::Int32(3));
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        let n = ValueBox::new(Datum::Float64(f64::NAN));
        assert_eq!(n.compare(&ValueBox::new(Datum::Float64(1.0))), Ok(Ordering::Equal));
        let t1 = ValueBox::new(Datum::Timeval(Timeval { sec: 1, usec: 999_999 }));
        let t2 = ValueBox::new(Datum::Timeval(Timeval { sec: 2, usec: 0 }));
        assert_eq!(t1.compare(&t2), Ok(Ordering::Less));
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let a = ValueBox::new(Datum::Uint8(1));
        let b = ValueBox::new(Datum::Uint16(1));
        assert_eq!(a.compare(&b), Err(ValueErr::TypeMismatch { a: FrType::Uint8, b: FrType::Uint16 }));
        assert!(ValueBox::compare_op(Op::Eq, &a, &b).is_err());
    }

    #[test]
    #[should_panic]
    fn invalid_panics() {
        let _ = ValueBox::default().compare(&ValueBox::default());
    }

    #[test]
    fn operators_on_scalars() {
        let a = ValueBox::new(Datum::Uint64(10));
        let b = ValueBox::new(Datum::Uint64(20));
        assert!(ValueBox::compare_op(Op::Lt, &a, &b).unwrap());
        assert!(ValueBox::compare_op(Op::Le, &a, &a).unwrap());
        assert!(ValueBox::compare_op(Op::Ne, &a, &b).unwrap());
        assert!(!ValueBox::compare_op(Op::Ge, &a, &b).unwrap());
    }

    #[test]
    fn cidr_examples() {
        let ten8 = v4p([10, 0, 0, 0], 8);
        let ten1_16 = v4p([10, 1, 0, 0], 16);
        assert!(ValueBox::compare_op(Op::Eq, &ten8, &v4p([10, 0, 0, 0], 8)).unwrap());
        assert!(!ValueBox::compare_op(Op::Eq, &ten8, &ten1_16).unwrap());
        assert!(ValueBox::compare_op(Op::Ne, &ten8, &ten1_16).unwrap());
        assert!(ValueBox::compare_op(Op::Le, &ten1_16, &ten8).unwrap());
        assert!(ValueBox::compare_op(Op::Ge, &ten8, &ten1_16).unwrap());
        assert!(!ValueBox::compare_op(Op::Le, &ten8, &ten1_16).unwrap());
        assert!(!ValueBox::compare_op(Op::Lt, &v4p([192, 0, 0, 0], 8), &v4p([192, 168, 0, 0], 16)).unwrap());
        assert!(!ValueBox::compare_op(Op::Gt, &v4p([192, 168, 0, 0], 16), &v4p([192, 0, 0, 0], 8)).unwrap());
    }

    #[test]
    fn cidr_equal_prefix() {
        let a = v4p([10, 0, 0, 0], 8);
        let b = v4p([24, 0, 0, 0], 8);
        assert!(!ValueBox::compare_op(Op::Eq, &a, &b).unwrap());
        assert!(!ValueBox::compare_op(Op::Le, &a, &b).unwrap());
        assert!(!ValueBox::compare_op(Op::Ge, &a, &b).unwrap());
        assert!(!ValueBox::compare_op(Op::Lt, &a, &b).unwrap());
        assert!(ValueBox::compare_op(Op::Ne, &a, &b).unwrap());
        assert!(!ValueBox::compare_op(Op::Ne, &a, &a).unwrap());
    }

    #[test]
    fn cidr_partial_byte() {
        let net = v4p([172, 16, 0, 0], 12);
        assert!(ValueBox::compare_op(Op::Lt, &v4([172, 31, 255, 255]), &net).unwrap());
        assert!(!ValueBox::compare_op(Op::Lt, &v4([172, 32, 0, 0]), &net).unwrap());
        assert!(ValueBox::compare_op(Op::Gt, &net, &v4([172, 20, 1, 1])).unwrap());
    }

    #[test]
    fn cidr_v6_and_mixed() {
        let net = ValueBox::new(Datum::Ipv6Prefix(InetAddr::v6("2001:db8::".parse::<Ipv6Addr>().unwrap(), 32, 0)));
        let host = ValueBox::new(Datum::Ipv6Addr(InetAddr::v6("2001:db8::1".parse::<Ipv6Addr>().unwrap(), 128, 0)));
        assert!(ValueBox::compare_op(Op::Le, &host, &net).unwrap());
        assert_eq!(ValueBox::compare_op(Op::Eq, &host, &v4([1, 2, 3, 4])), Err(ValueErr::IncompatibleFamilies));
        assert_eq!(strerror::last_error().as_deref(), Some("Cannot compare IPv4 with IPv6 address"));
    }

    #[test]
    fn op_tokens() {
        for op in Op::ALL {
            assert_eq!(Op::try_from(op.as_str()), Ok(op));
        }
        assert_eq!("=".parse::<Op>(), Ok(Op::Eq));
        assert!("=~".parse::<Op>().is_err());
        assert!(is_comparable(FrType::Uint8));
        assert!(!is_comparable(FrType::Tlv));
    }
}
