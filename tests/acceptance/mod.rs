//! Acceptance test modules.

mod common;
mod stopwatch_test;
mod tga_format_test;
