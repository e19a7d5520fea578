pub mod delete;
pub mod get;
pub mod post;
pub mod put;

pub(crate) const RATING_COLUMNS: &str = "r.id, r.user_id, r.network_id, r.device_id, r.value, \
     r.latitude, r.longitude, r.address, r.review, r.created_at";
