use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::TrainId;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template file {filename} not found in {} or the bundled templates", template_dir.display())]
    FileNotFound {
        filename: String,
        template_dir: PathBuf,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("template error: {0}")]
    Template(#[source] liquid::Error),
    #[error("could not convert report data: {0}")]
    Context(#[source] liquid::Error),
    #[error("unknown train {0}")]
    UnknownTrain(TrainId),
}
