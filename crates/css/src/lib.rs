pub mod cascade;
pub mod computed;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{cascaded_declarations, get_inline_style};
pub use computed::{ComputedStyle, NORMAL_LINE_HEIGHT_FACTOR, compute_style_for, default_display};
pub use syntax::{Declaration, Rule, Selector, Stylesheet, parse_stylesheet};
pub use values::{Display, FamilyName, FontStyle, FontWeight, Length, LineHeight, TextAlign};
