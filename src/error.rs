use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid {axis} axis length: {length}")]
    InvalidAxisLength { axis: &'static str, length: f64 },

    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("unknown zoom direction `{0}`")]
    InvalidZoomDirection(String),

    #[error("marker was already created")]
    AlreadyCreated,
}
