pub mod circular;
pub mod spring;

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Fruchterman-Reingold force-directed placement.
    Spring(SpringOptions),
    /// Nodes evenly spaced on a circle, in node order.
    Circular(CircularOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Spring(SpringOptions::default())
    }
}

#[derive(Debug, Clone)]
pub struct SpringOptions {
    pub iterations: usize,
    /// Optimal distance between nodes. `None` uses `1 / sqrt(n)`.
    pub k: Option<f64>,
    /// Stop early once the mean node displacement of an iteration drops below this.
    pub threshold: f64,
    /// Largest absolute coordinate of the returned layout.
    pub scale: f64,
    /// Seed for the random start positions. `None` draws one from the OS RNG.
    pub seed: Option<u64>,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            iterations: 1000,
            k: Some(0.7),
            threshold: 1e-4,
            scale: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircularOptions {
    pub scale: f64,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}
