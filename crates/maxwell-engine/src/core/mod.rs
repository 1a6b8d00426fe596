pub mod rect;
pub mod time;
pub mod timer;
