pub mod health;
pub mod hooks;
pub mod host_sync;
pub mod metadata;
pub mod settings;

#[cfg(test)]
mod tests;
