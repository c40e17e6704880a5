pub mod cli;
pub mod element;
pub mod error;
pub mod form;
pub mod merge;
pub mod resolver;
pub mod session;
pub mod trace;
