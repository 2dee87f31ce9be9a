pub mod budget;
pub mod configure;
pub mod convert;
pub mod create;
pub mod expense;
pub mod rates;
pub mod show;
pub mod status;
