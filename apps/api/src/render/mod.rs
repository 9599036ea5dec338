// Export renderers for the current study pack. Both are pure and synchronous.

pub mod digest;
pub mod print;

pub use digest::clipboard_digest;
pub use print::render_print_html;
