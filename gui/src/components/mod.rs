pub mod analog;
pub mod digital;

pub use analog::draw_analog;
pub use digital::draw_digital;
