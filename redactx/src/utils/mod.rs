// redactx/src/utils/mod.rs
pub mod clipboard;
