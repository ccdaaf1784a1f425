pub mod tick;
pub mod yahoo;

pub use tick::TickRunner;
pub use yahoo::YahooClient;
