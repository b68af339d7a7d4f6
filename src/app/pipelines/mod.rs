pub mod profit_pipeline;
