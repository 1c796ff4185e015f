use std::fmt;

/// Stored one-way password hash in PHC string format.
///
/// Carries the algorithm, its parameters and the per-hash salt, so a
/// credential can always be verified on its own. Never serialized outward:
/// the type deliberately implements neither `Serialize` nor `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a PHC string loaded from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
