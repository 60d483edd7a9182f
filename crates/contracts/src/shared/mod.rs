pub mod api;
pub mod paging;
