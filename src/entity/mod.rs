pub mod budget;
pub mod category;
pub mod date;
pub mod expense;
pub mod line;
pub mod money;
pub mod status;
