//! Attribute-Operator-Value expressions
//!
//! Policy snippets such as `Framed-IP-Address < 10.0.0.0/8` or `User-Name == "bob"`. The value
//! text is kept raw until the attribute's type is known, then run through the parse engine.
use std::sync::Arc;

use crate::{EnumTable, FrType, Op, ValueBox, ValueErr};

/// One parsed `attribute op value` expression, borrowing from its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValPair<'a> {
    /// Attribute name.
    pub attribute: &'a str,
    /// Relational operator.
    pub op: Op,
    /// Value text with any enclosing quotes removed.
    pub value: &'a str,
    /// Quote character the value was enclosed in.
    pub quote: Option<u8>,
}

fn is_attr_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

impl<'a> TryFrom<&'a str> for AttrValPair<'a> {
    type Error = ValueErr;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let text = value.trim();
        let name_len = text.find(|c: char| !is_attr_char(c)).unwrap_or(text.len());
        if name_len == 0 {
            return Err(ValueErr::ParseError(format!("No attribute name found in \"{value}\"")));
        }
        let (attribute, rest) = text.split_at(name_len);
        let rest = rest.trim_start();

        let op = Op::ALL
            .into_iter()
            .find(|op| rest.starts_with(op.as_str()))
            .or_else(|| rest.starts_with('=').then_some(Op::Eq))
            .ok_or_else(|| ValueErr::ParseError(format!("No valid operator found after \"{attribute}\"")))?;
        let token_len = if rest.starts_with(op.as_str()) { op.as_str().len() } else { 1 };
        let raw = rest[token_len..].trim();
        if raw.is_empty() {
            return Err(ValueErr::ParseError(format!("Missing value for \"{attribute}\"")));
        }

        let (value, quote) = match raw.as_bytes()[0] {
            q @ (b'"' | b'\'') => {
                if raw.len() < 2 || !raw.ends_with(char::from(q)) {
                    return Err(ValueErr::ParseError(format!("Unterminated quoted value for \"{attribute}\"")));
                }
                (&raw[1..raw.len() - 1], Some(q))
            }
            _ => (raw, None),
        };
        Ok(Self { attribute, op, value, quote })
    }
}

impl<'a> AttrValPair<'a> {
    /// Split `text` into attribute, operator and value.
    ///
    /// # Errors
    ///
    /// [`ValueErr::ParseError`] if any of the three parts is missing or a quote is left open.
    pub fn parse(text: &'a str) -> Result<Self, ValueErr> {
        Self::try_from(text)
    }

    /// Parse the value text as `ty`, resolving aliases through `enumv`.
    ///
    /// Address attributes accept a prefix on the right hand side (`Framed-IP-Address < 10/8`).
    ///
    /// # Errors
    ///
    /// Whatever [`ValueBox::from_str`] reports for the value text.
    pub fn value(&self, ty: FrType, enumv: Option<&Arc<EnumTable>>) -> Result<ValueBox, ValueErr> {
        let mut ty = match ty {
            FrType::Ipv4Addr if self.value.contains('/') => FrType::Ipv4Prefix,
            FrType::Ipv6Addr if self.value.contains('/') => FrType::Ipv6Prefix,
            other => other,
        };
        ValueBox::from_str(&mut ty, enumv, self.value.as_bytes(), self.quote, false)
    }

    /// Evaluate `candidate <op> value`, parsing the value as the candidate's type.
    ///
    /// # Errors
    ///
    /// Parse errors for the value text, and comparison errors from [`ValueBox::compare_op`].
    pub fn matches(&self, candidate: &ValueBox, enumv: Option<&Arc<EnumTable>>) -> Result<bool, ValueErr> {
        let rhs = self.value(candidate.ty(), enumv)?;
        ValueBox::compare_op(self.op, candidate, &rhs)
    }
}

impl core::fmt::Display for AttrValPair<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} ", self.attribute, self.op)?;
        match self.quote {
            Some(q) => write!(f, "{0}{1}{0}", char::from(q), self.value),
            None => f.write_str(self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Datum;

    #[test]
    fn splits_parts() {
        let p = AttrValPair::parse("Framed-IP-Address < 10.0.0.0/8").unwrap();
        assert_eq!(p.attribute, "Framed-IP-Address");
        assert_eq!(p.op, Op::Lt);
        assert_eq!(p.value, "10.0.0.0/8");
        assert_eq!(p.quote, None);

        let p = AttrValPair::parse("User-Name==\"bob smith\"").unwrap();
        assert_eq!((p.attribute, p.op, p.value, p.quote), ("User-Name", Op::Eq, "bob smith", Some(b'"')));

        let p = AttrValPair::parse("Session-Timeout >= 60").unwrap();
        assert_eq!(p.op, Op::Ge);
        let p = AttrValPair::parse("Service-Type = Framed-User").unwrap();
        assert_eq!(p.op, Op::Eq);
        assert_eq!(p.to_string(), "Service-Type == Framed-User");
    }

    #[test]
    fn rejects_malformed() {
        assert!(AttrValPair::parse("== 1").is_err());
        assert!(AttrValPair::parse("Attr 1").is_err());
        assert!(AttrValPair::parse("Attr ==").is_err());
        assert!(AttrValPair::parse("Attr == \"open").is_err());
        assert!(AttrValPair::parse("Attr == '").is_err());
    }

    #[test]
    fn evaluates_against_candidates() {
        let mut ty = FrType::Ipv4Addr;
        let addr = ValueBox::from_str(&mut ty, None, b"10.1.2.3", None, true).unwrap();
        assert!(AttrValPair::parse("Framed-IP-Address < 10.0.0.0/8").unwrap().matches(&addr, None).unwrap());
        assert!(!AttrValPair::parse("Framed-IP-Address < 192.168.0.0/16").unwrap().matches(&addr, None).unwrap());
        assert!(AttrValPair::parse("Framed-IP-Address != 10.1.2.4").unwrap().matches(&addr, None).unwrap());

        let name = ValueBox::strdup("it's", false).unwrap();
        assert!(AttrValPair::parse(r"User-Name == 'it\'s'").unwrap().matches(&name, None).unwrap());

        let mut table = EnumTable::new("Service-Type", FrType::Uint32);
        table.add("Framed-User", ValueBox::new(Datum::Uint32(2))).unwrap();
        let table = Arc::new(table);
        let st = ValueBox::new(Datum::Uint32(2));
        assert!(AttrValPair::parse("Service-Type == Framed-User").unwrap().matches(&st, Some(&table)).unwrap());
        assert!(AttrValPair::parse("Service-Type > 1").unwrap().matches(&st, Some(&table)).unwrap());
    }

    #[test]
    fn value_of_wrong_family() {
        let mut ty = FrType::Ipv4Addr;
        let addr = ValueBox::from_str(&mut ty, None, b"10.1.2.3", None, false).unwrap();
        let pair = AttrValPair::parse("Framed-IP-Address == ::1").unwrap();
        assert!(pair.matches(&addr, None).is_err());
    }
}
