use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaypathError {
    #[error("max path increment must be positive, got {0}")]
    MaxPathInc(f64),

    #[error("ray path backtracks at sample {index}: {dist_deg} < {prev_deg}")]
    Backtrack {
        index: usize,
        dist_deg: f64,
        prev_deg: f64,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
