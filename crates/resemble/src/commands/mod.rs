mod analyze;
mod compare;
mod init;

pub use self::analyze::analyze;
pub use self::compare::{CompareOptions, compare};
pub use self::init::init;
