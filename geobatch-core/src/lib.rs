pub mod gateways;
pub mod usecases;

pub mod entities {
    pub use geobatch_entities::{geo::*, table::*};
}
