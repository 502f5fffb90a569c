//! Node storage for linked structures.

pub mod node_pool;

pub use node_pool::NodePool;
