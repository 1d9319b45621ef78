pub mod card;
pub mod layout;

pub use card::{Mesh, Vertex, CARD_WIDTH, CARD_HEIGHT};
pub use layout::{LayoutProjector, Placement};
