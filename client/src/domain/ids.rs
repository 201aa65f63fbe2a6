//! Numeric identifiers assigned by the backend.
//!
//! Every resource family is keyed by a positive integer. Wrapping each in its
//! own type keeps a job id from being passed where a user id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw backend identifier.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw backend identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Account identifier carried in the bearer token as `userId`.
    UserId
);
define_id!(
    /// Job posting identifier.
    JobId
);
define_id!(
    /// Candidate profile identifier.
    CandidateId
);
define_id!(
    /// Job application identifier.
    ApplicationId
);
