use thiserror::Error;

/// All errors generated while building or driving a price chart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("unsupported indicator kind, {0}")]
    UnsupportedIndicatorKind(String),
    #[error("invalid chart height, {0}px")]
    InvalidHeight(u32),
    #[error("host container is missing or detached")]
    MissingContainer,
    #[error("rendering surface unavailable, {0}")]
    SurfaceUnavailable(String),
    #[error("host container already owns a live surface")]
    ContainerBusy,
    #[error("unknown series, {0}")]
    UnknownSeries(u64),
    #[error("resize observer unavailable, {0}")]
    ResizeObserverUnavailable(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
