pub mod mt_signal;
pub mod sar;
pub mod tags;

pub use mt_signal::{is_mt_on, is_mt_on_as, MtSignal};
pub use sar::{sar_range, sar_range_of_values};
pub use tags::*;
