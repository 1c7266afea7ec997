//! Rendering target seam.
//!
//! [`surface::RenderSurface`] abstracts the retained-mode canvas a scene graph draws into.
//! [`headless::HeadlessSurface`] records calls in memory.

pub(crate) mod headless;
pub(crate) mod surface;
