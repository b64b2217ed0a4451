pub mod common;
pub mod assembler_tests;
