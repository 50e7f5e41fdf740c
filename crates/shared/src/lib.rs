//! Domain types, input validation, and wire formats shared by the search form
//! front ends and the request coordinator.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod validation;
