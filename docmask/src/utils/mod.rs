// docmask/src/utils/mod.rs
pub mod discovery;
