//! Delimited text reading.

mod reader;

pub use reader::{
    MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, read_delimited,
    read_table_from_reader, validate_encoding,
};
