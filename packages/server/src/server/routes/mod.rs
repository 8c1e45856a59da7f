pub mod browse;
pub mod health;
pub mod privacy;
pub mod search;

pub use browse::browse_handler;
pub use health::health_handler;
pub use privacy::privacy_handler;
pub use search::search_handler;
