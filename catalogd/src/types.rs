//! Shared identifier types.

use uuid::Uuid;

pub type UserId = Uuid;
pub type ProductId = Uuid;
pub type CategoryId = Uuid;
pub type ApplicationId = Uuid;
pub type BannerId = Uuid;
pub type PartnerId = Uuid;

/// Shorten a UUID for log fields (first segment only).
pub fn abbrev_uuid(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}
