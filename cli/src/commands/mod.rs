pub mod cli;
pub mod dashboard;
pub mod run;
pub mod session;
