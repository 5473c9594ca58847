pub mod models;
pub mod period;
pub mod progress;
pub mod stages;

pub use models::*;
pub use period::Period;
pub use progress::ScrapeProgress;
pub use stages::Stage;
