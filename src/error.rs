use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the windowed host. Rendering itself cannot fail.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("no usable font found (searched {searched} locations)")]
    FontNotFound { searched: usize },

    #[error("failed to read font file {path}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a TrueType/OpenType font")]
    FontParse { path: PathBuf },

    #[error("event loop error")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("frame buffer error")]
    Pixels(#[from] pixels::Error),

    #[error("frame buffer resize failed")]
    Resize(#[from] pixels::TextureError),
}
