//! Structural elements module

mod member;
mod node;
mod support;

pub use member::{ElementKind, Geometry, Member};
pub use node::Node;
pub use support::Support;
