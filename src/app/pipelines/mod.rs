pub mod ranking_pipeline;

pub use ranking_pipeline::RankingPipeline;
