use std::time::{Duration, Instant};

/// A transient flag that hides itself once `duration` has elapsed.
#[derive(Debug, Clone)]
pub struct Alert {
  duration: Duration,
  shown_at: Option<Instant>,
}

impl Alert {
  pub fn new(duration: Duration) -> Self {
    Self {
      duration,
      shown_at: None,
    }
  }

  pub fn show(&mut self) {
    self.shown_at = Some(Instant::now());
  }

  pub fn close(&mut self) {
    self.shown_at = None;
  }

  pub fn is_visible(&self) -> bool {
    self
      .shown_at
      .is_some_and(|shown_at| shown_at.elapsed() < self.duration)
  }
}
