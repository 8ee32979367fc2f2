mod error;
mod geocode_address;
mod geocode_table;


pub use self::{error::Error, geocode_address::*, geocode_table::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::geocode::*};
}
