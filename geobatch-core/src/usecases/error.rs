use crate::entities::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The address column '{0}' does not exist")]
    AddressColumn(String),
    #[error(transparent)]
    Table(#[from] TableError),
}
