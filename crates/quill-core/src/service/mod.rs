//! Services - the business rules over the repository ports.

mod events;
mod posts;
mod users;

pub use events::EventsService;
pub use posts::{ListOptions, PostsService};
pub use users::UsersService;
