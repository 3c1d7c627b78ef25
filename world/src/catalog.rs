//! Static per-type attribute tables announced in the match preamble.

use rampart_core::{Attributes, Role, TypeCode, UnknownTypeError};

/// Attribute table for one side, keyed by type codes starting at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeCatalog {
    role: Role,
    entries: Vec<Attributes>,
}

impl AttributeCatalog {
    /// Builds a catalog whose `n`-th record (zero-based) receives type code `n + 1`.
    #[must_use]
    pub fn from_records(role: Role, records: Vec<Attributes>) -> Self {
        Self {
            role,
            entries: records,
        }
    }

    /// Side whose type codes this catalog resolves.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Resolves the attributes registered for `code`.
    pub fn lookup(&self, code: TypeCode) -> Result<&Attributes, UnknownTypeError> {
        let unknown = UnknownTypeError {
            role: self.role,
            code,
        };
        let index = code
            .get()
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .ok_or(unknown)?;
        self.entries.get(index).ok_or(unknown)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no types were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(code, attributes)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeCode, &Attributes)> + '_ {
        (1..).map(TypeCode::new).zip(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::from_records(
            Role::Attacker,
            vec![Attributes::new(10, 2, 3, 1, 5), Attributes::new(40, 1, 9, 2, 12)],
        )
    }

    #[test]
    fn codes_start_at_one() {
        let catalog = catalog();
        assert_eq!(
            catalog.lookup(TypeCode::new(1)),
            Ok(&Attributes::new(10, 2, 3, 1, 5))
        );
        assert_eq!(
            catalog.lookup(TypeCode::new(2)),
            Ok(&Attributes::new(40, 1, 9, 2, 12))
        );
    }

    #[test]
    fn zero_and_out_of_range_codes_are_unknown() {
        let catalog = catalog();
        for code in [0, 3, u32::MAX] {
            let error = catalog.lookup(TypeCode::new(code)).unwrap_err();
            assert_eq!(error.role, Role::Attacker);
            assert_eq!(error.code, TypeCode::new(code));
        }
    }

    #[test]
    fn iteration_follows_code_order() {
        let codes: Vec<u32> = catalog().iter().map(|(code, _)| code.get()).collect();
        assert_eq!(codes, vec![1, 2]);
    }

    #[test]
    fn empty_catalog_resolves_nothing() {
        let catalog = AttributeCatalog::from_records(Role::Defender, Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.lookup(TypeCode::new(1)).is_err());
    }
}
