pub mod calculator;
pub mod duration;
pub mod engine;
pub mod pipeline;
pub mod price_feed;

pub use crate::domain::model::{Dataset, ProfitRecord, Rankings};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
