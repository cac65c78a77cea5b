pub mod app;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod index;
pub mod loader;
pub mod output;
pub mod runner;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;
