// Low-level database access traits.
// The document store behind a repository is only consumed
// through these traits, no query is pushed down to it.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait NgoRepo {
    /// All registered NGOs in a stable iteration order.
    fn all_ngos(&self) -> Result<Vec<Ngo>>;

    fn get_ngo(&self, id: &str) -> Result<Ngo>;

    fn create_or_update_ngo(&self, ngo: &Ngo) -> Result<()>;

    fn count_ngos(&self) -> Result<usize> {
        Ok(self.all_ngos()?.len())
    }
}
