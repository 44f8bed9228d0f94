//! Unit test suites for the task domain, adapters, and services.

mod adapter_tests;
