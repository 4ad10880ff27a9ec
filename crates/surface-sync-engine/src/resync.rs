//! Full rebuild of the surface from the model.

/// Generation counter the host keys its surface mount on. Bumping it makes
/// the host tear the surface down and render it again from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResyncFallback {
    generation: u64,
}

impl ResyncFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a rebuild and returns the new generation.
    pub fn force_resync(&mut self) -> u64 {
        self.generation += 1;
        log::info!("forcing surface resync, generation {}", self.generation);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
