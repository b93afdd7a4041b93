//! Error types for the raytracer.

use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug)]
pub enum Error {
    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// An OBJ mesh could not be loaded.
    #[error("failed to load mesh: {0}")]
    MeshLoad(#[from] tobj::LoadError),

    /// A rendered frame could not be written out.
    #[error("failed to write image: {0}")]
    ImageWrite(#[from] image::ImageError),
}

/// Result type for raytracer operations.
pub type Result<T> = std::result::Result<T, Error>;
