mod frame;
mod headless_surface;
mod null_renderer;
mod primitives;
mod surface;

pub use frame::RenderFrame;
pub use headless_surface::HeadlessSurface;
pub use null_renderer::NullRenderer;
pub use primitives::{CirclePrimitive, Color, LinePrimitive, TextHAlign, TextPrimitive};
pub use surface::{ShapeId, SharedSurface, Surface, dispatch_press_move};

use crate::error::GraphResult;

/// Contract implemented by any ruler rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from axis math and marker interaction.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()>;
}
