use derive_more::{Display, Error};

/// A top-level error with automatic location tracking.
pub(crate) type Error = exn::Exn<ErrorKind>;
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Which stage of the run failed.
#[derive(Debug, Display, Error)]
pub(crate) enum ErrorKind {
    #[display("storage root is unusable")]
    StorageRoot,
    #[display("could not connect to the database")]
    Database,
    #[display("relocation run failed")]
    Relocation,
}
