use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not locate the donor address")]
    NoOrigin,
    #[error("Invalid search radius: {0} km")]
    InvalidRadius(f64),
    #[error("The organization name is missing")]
    OrgName,
    #[error("Invalid email address")]
    Email,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
