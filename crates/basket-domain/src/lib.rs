pub mod codec;
pub mod item;
pub mod list;
pub mod repository;
pub mod service;
pub mod session;
pub mod validation;

pub use item::DisplayItem;
pub use list::{ListId, ListSummary, NewList, StoredList};
pub use repository::ListRepository;
pub use service::ListService;
pub use session::{Progress, SessionOutcome, ShoppingSession};
