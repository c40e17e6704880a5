pub mod deep_merge;
pub mod merge_model;
