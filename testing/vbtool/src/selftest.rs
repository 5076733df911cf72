use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, ensure, Result};
use tracing::error;
use valuebox::{strerror, Datum, EnumTable, FrType, Op, ValueBox};

pub(crate) struct Test {
    pub name: &'static str,
    pub func: fn() -> Result<()>,
}

pub(crate) const TESTS: &[Test] = &[
    Test { name: "Text round trip", func: text_round_trip },
    Test { name: "Wire round trip", func: wire_round_trip },
    Test { name: "Cast identity", func: cast_identity },
    Test { name: "Signed range on cast", func: signed_range },
    Test { name: "CIDR containment", func: cidr_containment },
    Test { name: "Alias resolution", func: alias_resolution },
    Test { name: "Last error sink", func: last_error_sink },
];

const SAMPLES: &[(FrType, &str)] = &[
    (FrType::String, "hello world"),
    (FrType::Octets, "0x00ff10"),
    (FrType::Ipv4Addr, "192.0.2.1"),
    (FrType::Ipv4Prefix, "10.0.0.0/8"),
    (FrType::Ipv6Addr, "2001:db8::1"),
    (FrType::Ipv6Prefix, "2001:db8::/32"),
    (FrType::Ifid, "0:0:102:304"),
    (FrType::Ethernet, "00:11:22:33:44:55"),
    (FrType::Bool, "yes"),
    (FrType::Uint8, "200"),
    (FrType::Uint16, "65535"),
    (FrType::Uint32, "4294967295"),
    (FrType::Uint64, "18446744073709551615"),
    (FrType::Int8, "-128"),
    (FrType::Int16, "-2"),
    (FrType::Int32, "-2147483648"),
    (FrType::Int64, "9223372036854775807"),
    (FrType::Float32, "1.5"),
    (FrType::Float64, "-0.25"),
    (FrType::Date, "1500000000"),
    (FrType::DateMilliseconds, "1500000000000"),
    (FrType::Size, "4096"),
    (FrType::Timeval, "12.000500"),
];

fn parse(ty: FrType, text: &str) -> Result<ValueBox> {
    let mut ty = ty;
    Ok(ValueBox::from_str(&mut ty, None, text.as_bytes(), None, false)?)
}

fn text_round_trip() -> Result<()> {
    for &(ty, text) in SAMPLES {
        let value = parse(ty, text)?;
        let printed = value.asprint(None);
        let again = parse(ty, &printed)?;
        ensure!(again == value, "{ty}: {text} printed as {printed} and read back differently");
    }
    Ok(())
}

fn wire_round_trip() -> Result<()> {
    for &(ty, text) in SAMPLES.iter().filter(|(ty, _)| ty.is_network_encodable()) {
        let value = parse(ty, text)?;
        let mut wire = vec![0u8; value.network_length()];
        let enc = value.to_network(&mut wire)?;
        ensure!(enc.need == 0, "{ty}: encoding needed {} bytes", enc.need);
        let back = ValueBox::from_network(&wire[..enc.written], ty, true)?;
        ensure!(back == value, "{ty}: {text} did not survive the wire");
    }
    Ok(())
}

fn cast_identity() -> Result<()> {
    for &(ty, text) in SAMPLES {
        let value = parse(ty, text)?;
        ensure!(value.cast(ty, None)? == value, "{ty}: cast to itself changed the value");
    }
    Ok(())
}

fn signed_range() -> Result<()> {
    let big = ValueBox::new(Datum::Uint32(0x8000_0000));
    if big.cast(FrType::Int32, None).is_ok() {
        bail!("uint32 0x80000000 fit into int32");
    }
    ensure!(ValueBox::new(Datum::Uint32(7)).cast(FrType::Int32, None)? == ValueBox::new(Datum::Int32(7)));
    Ok(())
}

fn cidr_containment() -> Result<()> {
    let table = [
        ("10.0.0.0/8", Op::Le, "10.1.0.0/16", false),
        ("10.1.0.0/16", Op::Le, "10.0.0.0/8", true),
        ("10.1.0.0/16", Op::Lt, "10.0.0.0/8", true),
        ("10.1.0.0/16", Op::Gt, "10.0.0.0/8", false),
        ("10.0.0.0/8", Op::Ge, "10.1.0.0/16", true),
        ("10.0.0.0/8", Op::Eq, "10.1.0.0/16", false),
        ("10.0.0.0/8", Op::Ne, "11.0.0.0/8", true),
        ("192.168.0.0/16", Op::Lt, "10.0.0.0/8", false),
    ];
    for (a, op, b, want) in table {
        let got = ValueBox::compare_op(op, &parse(FrType::Ipv4Prefix, a)?, &parse(FrType::Ipv4Prefix, b)?)?;
        ensure!(got == want, "{a} {op} {b} gave {got}");
    }
    Ok(())
}

fn alias_resolution() -> Result<()> {
    let mut table = EnumTable::new("Service-Type", FrType::Uint32);
    table.add("Framed-User", ValueBox::new(Datum::Uint32(2)))?;
    let table = Arc::new(table);
    let mut ty = FrType::Uint32;
    let value = ValueBox::from_str(&mut ty, Some(&table), b"Framed-User", None, false)?;
    ensure!(value.asprint(None) == "Framed-User");
    let mut bare = value.copy()?;
    bare.set_enumv(None);
    ensure!(bare.asprint(None) == "2");
    Ok(())
}

fn last_error_sink() -> Result<()> {
    strerror::take_last_error();
    if parse(FrType::Uint8, "300").is_ok() {
        bail!("300 fit into uint8");
    }
    let msg = strerror::last_error().unwrap_or_default();
    ensure!(msg == "Value 300 is invalid for type uint8 (must be in range 0-255)", "sink held {msg:?}");
    Ok(())
}

/// Run every check, writing one line per test. Returns true if all passed.
pub(crate) fn run(out: &mut impl Write) -> std::io::Result<bool> {
    let mut all = true;
    for test in TESTS {
        let res = (test.func)();
        if let Err(e) = &res {
            error!(test = test.name, "{e:#}");
        }
        all &= res.is_ok();
        writeln!(out, "{}: {}", test.name, if res.is_ok() { "PASS" } else { "FAIL" })?;
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_check_passes() {
        let mut out = Vec::new();
        assert!(run(&mut out).unwrap(), "{}", String::from_utf8_lossy(&out));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), TESTS.len());
    }
}
