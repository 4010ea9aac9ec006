pub mod forecast;
pub mod services;
pub mod time;

pub use time::{Clock, FixedClock, SystemClock};
