// Crate-level test module
mod integration;
