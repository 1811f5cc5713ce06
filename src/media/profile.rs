//! Profile snapshot.

/// Immutable snapshot of a remote account, fetched once per handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Numeric account id used for pagination.
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub is_private: bool,
    pub is_verified: bool,
    pub post_count: u64,
    pub followers: i64,
    pub following: i64,
    pub biography: String,
    pub avatar_url: String,
}

impl Profile {
    /// Ensure the profile can be exported from.
    pub fn ensure_public(&self) -> crate::error::Result<()> {
        if self.is_private {
            return Err(crate::error::Error::Forbidden(self.handle.clone()));
        }
        Ok(())
    }
}
