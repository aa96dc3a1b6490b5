//! Unit tests for the todo module.
//!
//! Tests are organised by domain concept and by use case. Shared clocks,
//! fixtures and failure-injecting repositories live in [`support`].

mod support;
