// docmask/src/ui/mod.rs
pub mod output;
pub mod summary;
pub mod theme;
