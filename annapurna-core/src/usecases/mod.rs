mod error;
mod find_nearby_ngos;
mod store_ngo;

pub use self::{error::Error, find_nearby_ngos::*, store_ngo::*};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
