mod boots;
mod common;
mod config;
mod failed;
mod result;

pub use boots::BootsViewModel;
pub use common::{Guidance, StatusBadge, StatusLevel};
pub use config::ConfigViewModel;
pub use failed::FailedViewModel;
pub use result::CommandResultViewModel;

use std::fmt;

use crate::presentation::views::TextStyle;

/// A view model that knows how to project itself for each output format.
pub trait CreateView {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a>;

    fn to_html(&self) -> String;
}
