//! ULID-backed identifiers for every stored entity.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Create a new unique identifier.
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Parse an identifier from its string form.
            pub fn parse(s: &str) -> Result<Self, ulid::DecodeError> {
                Ok(Self(Ulid::from_string(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a support queue.
    QueueId
);
define_id!(
    /// Identifier of a single queue assignment row.
    AssignmentId
);
define_id!(
    /// Identifier of a member (artist or supporter).
    MemberId
);
define_id!(
    /// Identifier of a submitted track.
    SubmissionId
);
define_id!(
    /// Identifier of a genre family or subgenre.
    GenreId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        let id = QueueId::new();
        let parsed = QueueId::parse(&id.to_string()).expect("valid ulid");
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(MemberId::parse("not-a-ulid").is_err());
    }
}
