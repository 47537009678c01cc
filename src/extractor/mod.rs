mod block_length;
mod block_view;
mod xss_extractor;

pub use block_view::BlockView;
pub use xss_extractor::{BlockLocation, ExtractorError, XssBlockExtractor};
