mod schedule;

pub use schedule::SchedulePage;
