pub mod driver;
pub mod io;
pub mod types;

pub use driver::*;
pub use io::*;
pub use types::{EvalInputs, SortedSeqs};
