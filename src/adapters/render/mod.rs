//! Template renderer adapters.

mod html_renderer;

pub use html_renderer::HtmlTemplateRenderer;
