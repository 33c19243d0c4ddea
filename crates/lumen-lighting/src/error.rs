use lumen_grid::{GridError, Light};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LightError {
    #[error("worklist capacity {capacity} exceeded")]
    WorklistOverflow { capacity: usize },
    #[error("light level {level} outside dial range 0..={max}")]
    LevelOutOfRange { level: Light, max: Light },
    #[error("border plane holds {got} values, expected {expected}")]
    PlaneSize { got: usize, expected: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}
