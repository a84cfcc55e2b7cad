pub mod beneficiary;
pub mod product;
pub mod status;
pub mod supply;
pub mod user;
pub mod workshop;

pub use beneficiary::*;
pub use product::*;
pub use status::*;
pub use supply::*;
pub use user::*;
pub use workshop::*;

use std::borrow::Cow;

/// Records that list screens can filter.
pub trait Searchable {
    /// Text matched against the free-text filter, usually the display name.
    fn search_text(&self) -> Cow<'_, str>;

    fn status(&self) -> Option<Status> {
        None
    }
}

impl Searchable for String {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Searchable for &str {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}
