pub mod builtin;
pub mod chain;
pub mod resolver_model;
