use crate::domain::ports::{Pipeline, RankingOutput};
use crate::utils::error::Result;
use std::time::Instant;

/// Drives a [`Pipeline`] through extract, transform and load.
pub struct PipelineRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PipelineRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RankingOutput> {
        let started = Instant::now();
        tracing::info!("🚀 Starting candidate ranking");

        let loaded = self.pipeline.extract()?;
        tracing::info!(
            "📥 Loaded {} candidate(s), skipped {} file(s)",
            loaded.profiles.len(),
            loaded.skipped.len()
        );

        let phase = Instant::now();
        let result = self.pipeline.transform(loaded)?;
        tracing::info!(
            elapsed_ms = phase.elapsed().as_millis() as u64,
            "🧮 Ranked {} candidate(s)",
            result.ranked.len()
        );

        let output = self.pipeline.load(result)?;
        for path in &output.written {
            tracing::info!("💾 Output saved to: {}", path);
        }
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ Ranking completed"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CandidateProfile, JobRequirements};
    use crate::domain::ports::{LoadedCandidates, RankingResult};
    use crate::utils::error::RankError;

    struct FixedPipeline {
        profiles: usize,
    }

    impl Pipeline for FixedPipeline {
        fn extract(&self) -> Result<LoadedCandidates> {
            if self.profiles == 0 {
                return Err(RankError::NoCandidatesError { attempted: 1 });
            }
            Ok(LoadedCandidates {
                profiles: vec![CandidateProfile::default(); self.profiles],
                skipped: vec![],
            })
        }

        fn transform(&self, loaded: LoadedCandidates) -> Result<RankingResult> {
            let ranked = crate::core::engine::RankingEngine::default()
                .rank(&loaded.profiles, &JobRequirements::default());
            Ok(RankingResult {
                job: JobRequirements::default(),
                ranked,
                skipped: loaded.skipped,
            })
        }

        fn load(&self, result: RankingResult) -> Result<RankingOutput> {
            Ok(RankingOutput {
                report: format!("{} ranked", result.ranked.len()),
                written: vec![],
            })
        }
    }

    #[test]
    fn test_runner_chains_phases() {
        let output = PipelineRunner::new(FixedPipeline { profiles: 3 }).run().unwrap();
        assert_eq!(output.report, "3 ranked");
    }

    #[test]
    fn test_runner_propagates_extract_errors() {
        let err = PipelineRunner::new(FixedPipeline { profiles: 0 }).run().unwrap_err();
        assert!(matches!(err, RankError::NoCandidatesError { .. }));
    }
}
