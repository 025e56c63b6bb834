//! The document record the index was built to hold. The engines are
//! generic over their value type; `Document` is the canonical value the
//! benchmark harness and the verification front end store, keyed by
//! [`Document::id`].

use std::fmt;

/// Verification state of a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Freshly submitted, nobody has looked at it yet.
    New,
    /// Picked up for review.
    Pending,
    /// Review finished successfully.
    Verified,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::New => "new",
            Status::Pending => "pending",
            Status::Verified => "verified",
        };
        f.write_str(name)
    }
}

/// Metadata for one submitted document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Unique identifier, used as the tree key.
    pub id: u64,
    /// Short identifier for the applicant who submitted the document.
    pub applicant: String,
    /// File type string ("pdf", "doc").
    pub kind: String,
    /// Current verification state.
    pub status: Status,
}

impl Document {
    /// A new document starts out with [`Status::New`].
    pub fn new(id: u64, applicant: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            applicant: applicant.into(),
            kind: kind.into(),
            status: Status::New,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "document {} ({}, {}, {})",
            self.id, self.applicant, self.kind, self.status
        )
    }
}
