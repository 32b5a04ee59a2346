pub mod dispatch;
pub mod get;
pub mod list;
pub mod prerender;
pub mod schema;
