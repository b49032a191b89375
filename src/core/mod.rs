pub mod admin;
pub mod classify;
pub mod desk;
pub mod ledger;
pub mod log;
pub mod parser;
pub mod report;
pub mod session;
pub mod share;
