mod key;
mod record;

pub use key::{LookupKey, PREFIX_LEN};
pub use record::{LookupRecord, UNKNOWN};
