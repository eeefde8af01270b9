//! Service layer providing membership operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod clock;
pub mod member;
pub mod pagination;
#[cfg(test)]
pub mod test_support;
