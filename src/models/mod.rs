pub mod day;
pub mod focus;
pub mod streak;
pub mod todo;
