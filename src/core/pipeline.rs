pub use crate::app::pipelines::profit_pipeline::ProfitPipeline;
