//! Cell coordinates, values and the sparse grid that holds them

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::CellStorage;
pub use value::{CellValue, SharedString};
