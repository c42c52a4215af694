pub mod projection;
pub mod renderer;

pub use projection::GridProjection;
pub use renderer::Renderer;
