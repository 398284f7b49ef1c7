use crate::error::{Error, ErrorKind};
use crate::models::{MediaRecord, TenantId};
use exn::ResultExt;

#[derive(sqlx::FromRow)]
pub(crate) struct MediaRow {
    id: String,
    tenant_id: i64,
    media_url: String,
}
impl TryFrom<MediaRow> for MediaRecord {
    type Error = Error;
    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        Ok(Self {
            message_id: row.id,
            tenant_id: TenantId(u32::try_from(row.tenant_id).or_raise(|| ErrorKind::InvalidData("tenant id"))?),
            media_url: row.media_url,
        })
    }
}
