mod spinner;
mod stats;

pub use spinner::LoadingSpinner;
pub use stats::StatCard;
