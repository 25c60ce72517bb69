//! Syntax extensions layered onto the core grammar through hook chains.

pub mod flow;
pub mod jsx;
pub mod typescript;

pub use flow::FlowPlugin;
pub use jsx::JsxPlugin;
pub use typescript::TypeScriptPlugin;
