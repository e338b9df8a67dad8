pub mod blend;
pub mod io;

pub use io::{ensure_parent_dir, format_from_path, format_name, open_image, save_rgba};
