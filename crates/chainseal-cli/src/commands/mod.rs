//! Command implementations.

pub mod check_proof;
pub mod inspect;
pub mod prove;
pub mod root;
pub mod seal;
pub mod verify;
