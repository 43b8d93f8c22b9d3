pub mod matching;
pub mod pass;
pub mod reporting;

#[cfg(test)]
mod reporting_tests;
