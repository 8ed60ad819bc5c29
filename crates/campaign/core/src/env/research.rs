/// Research status lookups.
pub trait ResearchOracle: Send + Sync {
    fn is_researched(&self, tech: &str) -> bool;
}
