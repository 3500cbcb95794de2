pub mod index;
pub mod item;
pub mod traits;

#[doc(inline)]
pub use index::NodeIndex;
#[doc(inline)]
pub use item::{Graph, GraphBuilder, GraphError};
#[doc(inline)]
pub use traits::*;
