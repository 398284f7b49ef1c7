use crate::error::{Error, ErrorKind};
use crate::models::{TenantId, TenantSummary};
use exn::ResultExt;

#[derive(sqlx::FromRow)]
pub(crate) struct TenantRow {
    tenant_id: i64,
    media_count: i64,
}
impl TryFrom<TenantRow> for TenantSummary {
    type Error = Error;
    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            tenant_id: TenantId(u32::try_from(row.tenant_id).or_raise(|| ErrorKind::InvalidData("tenant id"))?),
            media_count: u64::try_from(row.media_count).or_raise(|| ErrorKind::InvalidData("media count"))?,
        })
    }
}
