//! UI error taxonomy.

use chime_playback::PlaybackError;
use chime_render::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("binding rectangle must have positive dimensions")]
    InvalidBind,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}
