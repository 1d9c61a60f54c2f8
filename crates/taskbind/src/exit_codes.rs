//! Exit codes for the CLI

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Resource declaration validation error
pub const VALIDATION_ERROR: i32 = 5;

/// A modifier could not be applied to the task spec
pub const MERGE_ERROR: i32 = 6;
