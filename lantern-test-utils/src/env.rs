//! Environment variable management for testing
//!
//! Tests that exercise environment-driven configuration must restore whatever
//! was set before them, or they leak into each other.

use std::env;

/// Overrides a single environment variable and restores it on drop
pub struct EnvVarGuard {
  name: String,
  /// The original value, if any
  original: Option<String>,
}

impl EnvVarGuard {
  /// Remember the current value of `name` without changing it
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Remember the current value of `name` and set it to `value`
  pub fn set_to(name: &str, value: &str) -> Self {
    let guard = Self::new(name);
    guard.set(value);
    guard
  }

  /// Remember the current value of `name` and unset it
  pub fn unset(name: &str) -> Self {
    let guard = Self::new(name);
    guard.remove();
    guard
  }

  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
