pub mod record;
pub mod response;

pub use record::{PresenceRecord, RecordId};
pub use response::{Markers, Response};
