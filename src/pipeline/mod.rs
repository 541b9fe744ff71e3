//! Training pipeline: opponents, the training loop and its observers

pub mod observers;
pub mod opponents;
pub mod training;

pub use observers::{
    MetricsObserver, MetricsSummary, Observation, ProgressObserver, RecordingObserver,
    StepObservation,
};
pub use opponents::UniformRandomPolicy;
pub use training::{DEFAULT_BLOCK_SIZE, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Observer, Policy};
