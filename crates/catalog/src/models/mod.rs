mod media;
mod tenant;

pub(crate) use self::media::MediaRow;
pub(crate) use self::tenant::TenantRow;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A tenant ("company") identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TenantId(pub u32);
impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// One message's attached media, as recorded in the database.
///
/// `media_url` is whatever was stored at upload time: a relative path, an
/// absolute path, or a URL, possibly carrying a stale tenant segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    /// Opaque message identifier.
    pub message_id: String,
    pub tenant_id: TenantId,
    pub media_url: String,
}

/// A tenant that has at least one media record, and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantSummary {
    pub tenant_id: TenantId,
    pub media_count: u64,
}
