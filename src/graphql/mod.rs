pub mod graph;
pub mod graph_schema;
pub mod inputs;
pub mod loaders;
pub mod mutation;
pub mod scalars;
pub mod types;

pub use graph_schema::{AppSchema, GraphqlService};
