use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident($repr:ty), $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $repr);

        impl $name {
            #[inline]
            pub const fn new(value: $repr) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Stable index of a base in the campaign arena. Never reused within a campaign.
    BaseId(u16),
    "base"
);

id_type!(
    /// Interned species key issued by the species oracle.
    ///
    /// Equality is identity: two ids are the same species exactly when the
    /// oracle issued them for the same definition.
    SpeciesId(u16),
    "species"
);

id_type!(
    /// Interned item key issued by the item oracle.
    ItemId(u16),
    "item"
);

id_type!(
    /// Unique character number of a hired or hireable employee.
    EmployeeId(u32),
    "ucn"
);

id_type!(
    /// Campaign-wide aircraft index.
    AircraftId(u32),
    "aircraft"
);

id_type!(
    /// Identifier of a pending transfer. Allocated monotonically by the roster.
    TransferId(u32),
    "transfer"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_prefix() {
        assert_eq!(BaseId(3).to_string(), "base#3");
        assert_eq!(EmployeeId(42).to_string(), "ucn#42");
    }
}
