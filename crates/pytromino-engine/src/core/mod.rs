pub use self::{board::*, holder::*, piece::*, position::*, transform::*};

pub(crate) mod board;
pub(crate) mod holder;
pub(crate) mod piece;
pub(crate) mod position;
pub(crate) mod transform;
