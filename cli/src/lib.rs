pub mod cli;
pub mod error;
pub mod io;
pub mod report;
pub mod runner;

pub use runner::Job;
