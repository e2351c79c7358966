//! Domain-agnostic planning-solver core.
//!
//! Provides the solution-graph machinery a metaheuristic planning
//! engine is built on:
//!
//! - **Domain meta-model**: planning domains are registered at runtime —
//!   classes with inheritance, declared field types, planning flags,
//!   enums and comparators — so the engine works against models that
//!   are unknown at compile time.
//! - **Solution descriptor**: the metadata layer naming the solution
//!   root, its entity classes and entity-valued properties, plus
//!   immutability and sizing queries.
//! - **Deep planning clone**: an independent structural copy of a
//!   solution graph. Mutable decision state is copied, immutable facts
//!   are shared, aliasing and cycles are preserved, and stack usage is
//!   bounded on arbitrarily deep graphs. Cloning is what lets a solver
//!   snapshot its best solution and hand parallel workers independent
//!   working copies.
//!
//! # Architecture
//!
//! This crate contains no search algorithms and no score calculation:
//! construction heuristics, local search, move selection and
//! termination live in consumer layers, which use
//! [`cloner::SolutionCloner`] against a [`domain::SolutionDescriptor`]
//! they provide.

pub mod cloner;
pub mod domain;
