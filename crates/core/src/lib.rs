#![deny(warnings)]

pub mod config;
pub mod shell;
pub mod translate;
