pub mod access;
pub mod cancel;
pub mod diagnosis;
pub mod error;
pub mod intake;
pub mod pulse;
pub mod reactor;
pub mod report;
pub mod session;
pub mod table;
pub mod telemetry;
pub mod time;
pub mod timer;
