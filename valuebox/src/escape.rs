//! Quote aware escape codec.
//!
//! The quote character a string was written with selects how backslashes are read:
//!
//! | Quote | Behaviour |
//! |-------|-----------|
//! | none | bytes are taken verbatim |
//! | `'` | only `\'` and `\\` are escapes |
//! | anything else | `\r \n \t \\`, `\<quote>`, `\xHH` and `\OOO` are escapes |
//!
//! Unrecognised sequences keep their backslash. Unescaping never produces more bytes than it
//! reads.

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Unescape `input` according to `quote`, appending to `out`. Returns the bytes written.
pub fn unescape_into(out: &mut Vec<u8>, input: &[u8], quote: Option<u8>) -> usize {
    let start = out.len();
    match quote {
        None => out.extend_from_slice(input),
        Some(b'\'') => unescape_single(out, input),
        Some(q) => unescape_full(out, input, q),
    }
    out.len() - start
}

/// Unescape `input` according to `quote` into a new vector.
pub fn unescape(input: &[u8], quote: Option<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    unescape_into(&mut out, input, quote);
    out
}

fn unescape_single(out: &mut Vec<u8>, input: &[u8]) {
    let mut p = 0;
    while p < input.len() {
        match (input[p], input.get(p + 1)) {
            (b'\\', Some(&next @ (b'\'' | b'\\'))) => {
                out.push(next);
                p += 2;
            }
            (c, _) => {
                out.push(c);
                p += 1;
            }
        }
    }
}

fn hex_value(c: u8) -> Option<u8> {
    HEX.iter().position(|&h| h == c.to_ascii_lowercase()).map(|v| v as u8)
}

fn octal_value(digits: &[u8]) -> Option<u8> {
    digits.iter().try_fold(0u16, |acc, &d| match d {
        b'0'..=b'7' => Some(acc * 8 + u16::from(d - b'0')),
        _ => None,
    })
    .and_then(|v| u8::try_from(v).ok())
}

/// Decode the escape whose body starts at `rest` (just past the backslash).
/// Returns the decoded byte and how much of `rest` it used.
fn numeric_escape(rest: &[u8]) -> Option<(u8, usize)> {
    if rest[0] == b'x' {
        let hi = hex_value(rest[1])?;
        let lo = hex_value(rest[2])?;
        return Some(((hi << 4) | lo, 3));
    }
    octal_value(&rest[..3]).map(|v| (v, 3))
}

fn unescape_full(out: &mut Vec<u8>, input: &[u8], quote: u8) {
    let mut p = 0;
    while p < input.len() {
        let c = input[p];
        p += 1;
        if c != b'\\' {
            out.push(c);
            continue;
        }
        let rest = &input[p..];
        let simple = match rest.first() {
            // trailing backslash
            None => {
                out.push(c);
                return;
            }
            Some(b'r') => Some(b'\r'),
            Some(b'n') => Some(b'\n'),
            Some(b't') => Some(b'\t'),
            Some(b'\\') => Some(b'\\'),
            Some(&q) if q == quote => Some(quote),
            Some(_) => None,
        };
        if let Some(byte) = simple {
            out.push(byte);
            p += 1;
            continue;
        }
        // Numeric escapes need three characters. Anything shorter is copied as is.
        if rest.len() < 3 {
            out.push(c);
            out.extend_from_slice(rest);
            return;
        }
        match numeric_escape(rest) {
            Some((byte, used)) => {
                out.push(byte);
                p += used;
            }
            None => out.push(c),
        }
    }
}

/// Escape `input` so that [`unescape`] with the same `quote` gives it back, appending to `out`.
///
/// The surrounding quote characters are not written.
pub fn escape_into(out: &mut Vec<u8>, input: &[u8], quote: Option<u8>) {
    let Some(quote) = quote else {
        out.extend_from_slice(input);
        return;
    };
    if quote == b'\'' {
        for &c in input {
            if c == b'\'' || c == b'\\' {
                out.push(b'\\');
            }
            out.push(c);
        }
        return;
    }

    let mut p = 0;
    while p < input.len() {
        let c = input[p];
        match c {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ if c == quote => out.extend_from_slice(&[b'\\', c]),
            0x20..=0x7e => out.push(c),
            0x80.. => {
                let len = utf8_len(c);
                match input.get(p..p + len) {
                    Some(seq) if len > 1 && core::str::from_utf8(seq).is_ok() => {
                        out.extend_from_slice(seq);
                        p += len;
                        continue;
                    }
                    _ => push_octal(out, c),
                }
            }
            _ => push_octal(out, c),
        }
        p += 1;
    }
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 1,
    }
}

fn push_octal(out: &mut Vec<u8>, c: u8) {
    out.extend_from_slice(&[b'\\', b'0' + (c >> 6), b'0' + ((c >> 3) & 7), b'0' + (c & 7)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_quote_is_verbatim() {
        assert_eq!(unescape(br"a\tb", None), br"a\tb");
    }

    #[test]
    fn double_quote_escapes() {
        assert_eq!(unescape(br"a\tb", Some(b'"')), b"a\tb");
        assert_eq!(unescape(br#"say \"hi\"\r\n"#, Some(b'"')), b"say \"hi\"\r\n");
        assert_eq!(unescape(br"\x41\x6a", Some(b'"')), b"Aj");
        assert_eq!(unescape(br"\101\000z", Some(b'"')), b"A\0z");
        assert_eq!(unescape(br"back\\slash", Some(b'"')), br"back\slash");
    }

    #[test]
    fn other_quote_only_escapes_itself() {
        assert_eq!(unescape(br"\`x\`", Some(b'`')), b"`x`");
        assert_eq!(unescape(br#"\""#, Some(b'`')), br#"\""#);
    }

    #[test]
    fn invalid_sequences_are_kept() {
        assert_eq!(unescape(br"\12x", Some(b'"')), br"\12x");
        assert_eq!(unescape(br"end\12", Some(b'"')), br"end\12");
        assert_eq!(unescape(br"trail\", Some(b'"')), br"trail\");
        assert_eq!(unescape(br"\q", Some(b'"')), br"\q");
        assert_eq!(unescape(br"\xZZ", Some(b'"')), br"\xZZ");
        assert_eq!(unescape(br"\999", Some(b'"')), br"\999");
        assert_eq!(unescape(br"\400", Some(b'"')), br"\400");
    }

    #[test]
    fn single_quote_mode() {
        assert_eq!(unescape(br"O\'Brien", Some(b'\'')), b"O'Brien");
        assert_eq!(unescape(br"a\\b\tc", Some(b'\'')), br"a\b\tc");
        assert_eq!(unescape(br"\12", Some(b'\'')), br"\12");
    }

    #[test]
    fn never_expands() {
        let input = br#"\x41\101\n\\\"plain\q\"#;
        assert!(unescape(input, Some(b'"')).len() <= input.len());
    }

    #[test]
    fn escape_round_trips() {
        let raw: &[u8] = b"tab\there \"quoted\" back\\slash \x01\x7f caf\xc3\xa9 \xff";
        for q in [b'"', b'`', b'\''] {
            let mut escaped = Vec::new();
            escape_into(&mut escaped, raw, Some(q));
            assert_eq!(unescape(&escaped, Some(q)), raw, "quote {}", q as char);
        }
        let mut e = Vec::new();
        escape_into(&mut e, b"\x01\xff\xc3\xa9", Some(b'"'));
        assert_eq!(e, b"\\001\\377\xc3\xa9");
    }
}
