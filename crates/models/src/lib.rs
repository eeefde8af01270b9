pub mod errors;
pub mod db;
pub mod plan;
pub mod member;

#[cfg(test)]
mod tests;
