pub mod media;
pub mod photos;

pub use media::{DiskMediaStore, MediaStore, UploadFile, MAX_REQUEST_BYTES};
pub use photos::{PhotoService, MAX_PHOTOS};
