mod office_directory;

pub use office_directory::{OfficeDirectory, OfficeDirectoryError, OfficeLookup};
