// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Builds a v4 id from caller-supplied random bytes so seeded
            /// generators produce reproducible ids.
            pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
                Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }

            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(CompanyId);
entity_id!(EmployeeId);

#[cfg(test)]
mod tests {
    use super::{CompanyId, EmployeeId};

    #[test]
    fn random_bytes_produce_v4_ids() {
        let id = CompanyId::from_random_bytes([7; 16]);
        assert_eq!(id.get().get_version_num(), 4);
        assert_eq!(id, CompanyId::from_random_bytes([7; 16]));
        assert_ne!(id, CompanyId::from_random_bytes([8; 16]));
    }

    #[test]
    fn display_matches_hyphenated_uuid() {
        let id = EmployeeId::from_random_bytes([0xAB; 16]);
        assert_eq!(id.to_string(), id.get().hyphenated().to_string());
    }
}
