//! Order domain - record model, durable store and intake orchestration

pub mod model;
pub mod service;
pub mod store;

pub use model::{Order, OrderSubmission};
pub use service::OrderService;
pub use store::{OrderStore, StoreError};
