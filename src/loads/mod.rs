//! Nodal and member loads

mod member_load;
mod node_load;

pub use member_load::{LoadIntegral, MemberLoad, MemberLoadKind};
pub use node_load::NodeLoad;
