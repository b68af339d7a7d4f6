use crate::core::Pipeline;
use crate::domain::model::Rankings;
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub output_path: String,
    pub rankings: Rankings,
}

pub struct RankingEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RankingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// One full recomputation: extract, rank, render.
    pub async fn run(&self) -> Result<RunOutput> {
        let started = Instant::now();
        tracing::info!("Starting profit ranking run");

        tracing::info!("📥 Loading seed definitions and market prices...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} crops, {} fruits, {} tradable prices",
            dataset.crops.len(),
            dataset.fruits.len(),
            dataset.prices.len()
        );

        tracing::info!("🧮 Computing rankings...");
        let rankings = self.pipeline.transform(dataset).await?;
        tracing::info!(
            "Ranked {} crops and {} fruits",
            rankings.crops.len(),
            rankings.fruits.len()
        );

        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(&rankings).await?;
        tracing::info!(
            "Report saved to: {} ({:?} elapsed)",
            output_path,
            started.elapsed()
        );

        Ok(RunOutput {
            output_path,
            rankings,
        })
    }
}
