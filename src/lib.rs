//! Taskforest: hierarchical task persistence core.
//!
//! This crate provides the storage-facing core of a task management system:
//! a single `Task` entity organised into a parent/child forest, persisted
//! behind a repository port with pluggable adapters.
//!
//! # Architecture
//!
//! Taskforest follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//! - **Services**: Orchestration consumed by the transport boundary
//!
//! The HTTP routing layer, request logging, and authentication are external
//! collaborators; the hierarchy rules (no delete while children exist, root
//! and project-scoped listing) live entirely in this crate.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
