mod card_stack;
mod footer;
mod header;
mod pagination;
mod popup;
mod status_bar;

pub use card_stack::CardStackWidget;
pub use footer::{FooterWidget, CURRENT_USER_AVATAR_URL};
pub use header::{HeaderWidget, GROUP_ICON_URL, PROFILE_AVATAR_URL};
pub use pagination::PaginationWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
