mod manifest;
mod output;
mod page;

pub use manifest::{Manifest, ManifestEntry};
pub use output::{EmitError, OutputDirectory};
pub use page::{page_file_name, render_page};
