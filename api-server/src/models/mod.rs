//! Data models

pub mod hiring;

pub use hiring::*;
