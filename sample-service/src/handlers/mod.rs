pub mod health;
pub mod items;
pub mod lists;

pub use health::health;
pub use items::{item, key_convert};
pub use lists::{more_list, more_list_by_key, page_list, page_only};
