//! Store metadata types usable across crates.

/// Typed key identifying an observation store in logs and error tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey(pub &'static str);

impl StoreKey {
    /// Construct a new typed store key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<StoreKey> for &'static str {
    fn from(k: StoreKey) -> Self {
        k.0
    }
}
