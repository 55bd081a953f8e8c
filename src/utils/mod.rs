pub mod file_size;

pub use file_size::FileSizeUtils;
