//! The Pollock program format.
//!
//! A Pollock program is a sequence of RGB cells: two header cells followed by
//! one instruction cell per assembled source line. The cells are laid out on a
//! near-square grid and rasterized as solid `cell_size x cell_size` blocks.

pub mod cell;
pub mod error;
pub mod layout;
pub mod opcode;
pub mod program;
pub mod raster;
pub mod resource;

pub use cell::Cell;
pub use error::FormatError;
pub use layout::GridLayout;
pub use opcode::OpCode;
pub use program::PollockProgram;
pub use resource::{ReadableResource, WriteableResource};
