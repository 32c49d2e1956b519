mod declaration;
mod descriptor;
mod marker;
mod resolved;

pub use declaration::*;
pub use descriptor::*;
pub use marker::*;
pub use resolved::*;

pub(crate) use declaration::full_name;
