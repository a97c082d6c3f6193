use crate::model::StructuralError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Color count must be between 1 and {available} (got {requested})")]
    ColorCountOutOfRange { requested: usize, available: usize },

    #[error(
        "Requested {requested} edges but {vertices} vertices only admit {possible} distinct pairs"
    )]
    TooManyEdges {
        requested: usize,
        vertices: usize,
        possible: usize,
    },

    #[error(
        "Gave up placing vertices after {attempts} samples ({placed} of {requested} placed); the coordinate space is too small for that many unique positions"
    )]
    VertexSpaceExhausted {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error("Gave up placing edges after {attempts} samples ({placed} of {requested} placed)")]
    EdgeSpaceExhausted {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    #[error(
        "Gave up searching for a valid coloring after {attempts} generated graphs (distance bound {max_distance})"
    )]
    RetriesExhausted { attempts: usize, max_distance: u32 },

    #[error(transparent)]
    Structure(#[from] StructuralError),
}
