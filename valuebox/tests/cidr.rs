use valuebox::{FrType, Op, ValueBox, ValueErr};

fn net(text: &str) -> ValueBox {
    let mut ty = FrType::ComboIpPrefix;
    ValueBox::from_str(&mut ty, None, text.as_bytes(), None, false).unwrap()
}

#[test]
fn containment_table() {
    let table = [
        ("10.0.0.0/8", Op::Lt, "10.0.0.0/8", false),
        ("10.0.0.0/8", Op::Le, "10.0.0.0/8", true),
        ("10.0.0.0/8", Op::Eq, "10.0.0.0/8", true),
        ("10.0.0.0/8", Op::Ne, "10.0.0.0/8", false),
        ("10.0.0.0/8", Op::Le, "10.1.0.0/16", false),
        ("10.1.0.0/16", Op::Le, "10.0.0.0/8", true),
        ("10.1.0.0/16", Op::Lt, "10.0.0.0/8", true),
        ("10.1.0.0/16", Op::Ge, "10.0.0.0/8", false),
        ("10.0.0.0/8", Op::Gt, "10.1.0.0/16", true),
        ("10.0.0.0/8", Op::Gt, "11.1.0.0/16", false),
        ("10.1.2.3", Op::Lt, "10.1.2.0/24", true),
        ("10.1.3.3", Op::Lt, "10.1.2.0/23", true),
        ("10.1.4.3", Op::Lt, "10.1.2.0/23", false),
        ("0.0.0.0/0", Op::Ge, "192.0.2.1", true),
        ("2001:db8:1::/48", Op::Lt, "2001:db8::/32", true),
        ("2001:db9::/48", Op::Lt, "2001:db8::/32", false),
    ];
    for (a, op, b, want) in table {
        assert_eq!(ValueBox::compare_op(op, &net(a), &net(b)).unwrap(), want, "{a} {op} {b}");
    }
}

#[test]
fn families_do_not_mix() {
    let err = ValueBox::compare_op(Op::Lt, &net("10.0.0.0/8"), &net("::/0")).unwrap_err();
    assert_eq!(err, ValueErr::IncompatibleFamilies);
}
