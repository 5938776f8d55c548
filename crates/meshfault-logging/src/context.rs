//! Span names shared across the meshfault crates
//!
//! A simulation run opens [`spans::SIMULATION_RUN`] carrying its run id,
//! start, end and probability. The failure pass and the path query nest
//! inside it, so every event they emit is correlated with the run through
//! the span list rather than through any ambient state.

/// Standard span names for consistency across crates
pub mod spans {
    pub const SIMULATION_RUN: &str = "simulation_run";
    pub const FAILURE_PASS: &str = "failure_pass";
    pub const PATH_QUERY: &str = "path_query";
}

#[cfg(test)]
mod tests {
    use super::spans;

    #[test]
    fn test_span_names_are_distinct() {
        let names = [spans::SIMULATION_RUN, spans::FAILURE_PASS, spans::PATH_QUERY];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
