pub mod page_store;
pub mod markdown_service;

pub use page_store::PageStore;
pub use markdown_service::MarkdownService;
