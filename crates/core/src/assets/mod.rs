//! Assets module - cached snapshot, history and search queries.

mod assets_model;
mod assets_service;
mod assets_traits;


pub use assets_model::SearchScope;
pub use assets_service::AssetQueryService;
pub use assets_traits::AssetQueryServiceTrait;
