#![allow(unused_imports)]

#[doc(hidden)]
pub use crate::logger::{self, LogAbout, LogSev};

#[doc(hidden)]
pub use crate::media::surface::{Surface, SurfaceView};

#[doc(hidden)]
pub use crate::media::texture_manager::{
    SurfaceHandle, SurfaceSetHandle, TextureHandle, TextureManager, TextureSetHandle,
};

#[doc(hidden)]
pub use crate::render::backend::{RenderBackend, TextureId};
