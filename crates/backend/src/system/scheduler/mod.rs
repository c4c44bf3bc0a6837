pub mod worker;

pub use worker::SweepWorker;
