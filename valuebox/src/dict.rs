//! Enumeration aliases.
//!
//! An [`EnumTable`] maps symbolic names (`Framed-User`) to values of one attribute type and back.
//! Boxes only ever hold a weak reference to a table, so the dictionary owns its tables.

use fnv::FnvHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{Datum, FrType, ValueBox, ValueErr};

/// Hash key for a value: its payload bytes, plus prefix and scope for addresses. Values that
/// compare equal get the same key.
type ValueKey = SmallVec<[u8; 24]>;

fn value_key(datum: &Datum) -> ValueKey {
    let mut key = match datum {
        Datum::Float32(v) if *v == 0.0 => SmallVec::from_slice(&0f32.to_ne_bytes()),
        Datum::Float64(v) if *v == 0.0 => SmallVec::from_slice(&0f64.to_ne_bytes()),
        other => SmallVec::from_slice(&other.ne_bytes()),
    };
    if let Some(a) = datum.inet() {
        key.push(a.prefix);
        key.extend_from_slice(&a.scope_id.to_ne_bytes());
    }
    key
}

/// Longest alias name accepted.
pub const MAX_ALIAS_LEN: usize = 128;

/// Aliases for the values of one attribute.
#[derive(Debug, Clone)]
pub struct EnumTable {
    name: String,
    ty: FrType,
    by_alias: FnvHashMap<String, ValueBox>,
    by_value: FnvHashMap<ValueKey, String>,
}

impl EnumTable {
    /// An empty table for attribute `name` holding values of type `ty`.
    pub fn new(name: impl Into<String>, ty: FrType) -> Self {
        Self { name: name.into(), ty, by_alias: FnvHashMap::default(), by_value: FnvHashMap::default() }
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of every value in the table.
    pub fn ty(&self) -> FrType {
        self.ty
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    /// True if the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }

    /// Register `alias` for `value`.
    ///
    /// The first alias registered for a value is the one printed for it.
    ///
    /// # Errors
    ///
    /// | Error | Cause |
    /// |-------|-------|
    /// | [`ValueErr::ParseError`] | `alias` is not a legal name, or is already taken |
    /// | [`ValueErr::TypeMismatch`] | `value` is not of the table's type |
    pub fn add(&mut self, alias: &str, value: ValueBox) -> Result<(), ValueErr> {
        if !Self::valid_name(alias.as_bytes()) {
            return Err(ValueErr::ParseError(format!("Invalid alias name \"{alias}\"")));
        }
        if value.ty() != self.ty {
            return Err(ValueErr::TypeMismatch { a: self.ty, b: value.ty() });
        }
        if self.by_alias.contains_key(alias) {
            return Err(ValueErr::ParseError(format!("Duplicate alias \"{alias}\" for {}", self.name)));
        }
        self.by_value.entry(value_key(value.datum())).or_insert_with(|| alias.to_owned());
        self.by_alias.insert(alias.to_owned(), value);
        Ok(())
    }

    /// Value registered for `alias`.
    pub fn lookup_alias(&self, alias: &str) -> Option<&ValueBox> {
        let hit = self.by_alias.get(alias);
        if hit.is_some() {
            debug!(attr = %self.name, alias, "alias resolved");
        }
        hit
    }

    /// Alias registered for `value`.
    pub fn lookup_value(&self, value: &ValueBox) -> Option<&str> {
        if value.ty() != self.ty {
            return None;
        }
        self.by_value.get(&value_key(value.datum())).map(String::as_str)
    }

    /// True if `name` could be an alias: non-empty, at most [`MAX_ALIAS_LEN`] bytes of ASCII
    /// letters, digits and `-_./:+`.
    pub fn valid_name(name: &[u8]) -> bool {
        !name.is_empty()
            && name.len() <= MAX_ALIAS_LEN
            && name.iter().all(|c| c.is_ascii_alphanumeric() || b"-_./:+".contains(c))
    }
}
