use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── BACKEND IDS ───────────────────────────────────────────────────────────────
//

// Backend-issued identifiers are opaque strings; the client never parses them.
macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

backend_id!(
    /// Identifier of a CSR program.
    ProgramId
);
backend_id!(
    /// Identifier of a funding partner.
    PartnerId
);
backend_id!(
    /// Identifier of a school (not of its assignment to a program).
    SchoolId
);
backend_id!(
    /// Identifier of a student certificate.
    CertificateId
);
backend_id!(StudentId);
backend_id!(ReportId);

//
// ─── CONTENT IDS ───────────────────────────────────────────────────────────────
//

// Game content ids are small integers authored by hand in the library file.
macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

content_id!(
    /// Identifier of a prompt within one game.
    PromptId
);
content_id!(
    /// Identifier of an option within one prompt.
    OptionId
);
content_id!(
    /// Identifier of a draggable item in a match puzzle.
    ItemId
);
content_id!(
    /// Identifier of a target category in a match puzzle.
    CategoryId
);
content_id!(StageId);
