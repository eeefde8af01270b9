
/// CRUD operations tests for the member entity
pub mod crud_tests;
