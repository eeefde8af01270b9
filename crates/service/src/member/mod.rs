//! Membership module: three-layer architecture (domain, repository, service).
//!
//! Plan derivation, lateness and search rules live here; persistence is
//! reached only through [`repository::MemberRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::MemberError;
pub use service::MemberService;
