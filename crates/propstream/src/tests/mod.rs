#[cfg(feature = "std")]
mod store;
