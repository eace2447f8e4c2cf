pub mod error;
pub mod action;
pub mod chain;
pub mod separation;
pub mod phrase;
pub mod canonical;
pub mod abstraction;
pub mod ledger;
pub mod miner;
pub mod record;
pub mod ignore;
pub mod report;
pub mod config;
pub mod logging;

pub use error::{Error, Result};
