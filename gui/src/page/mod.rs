pub mod clock_page;

pub use clock_page::ClockPage;
