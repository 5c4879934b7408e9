pub mod config;
pub mod history;
pub mod quote;
pub mod run;
