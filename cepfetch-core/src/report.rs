use crate::model::RaceOutcome;

pub const TIMEOUT_NOTICE: &str = "Timeout";

/// Render one outcome as the block printed for its code.
pub fn render(outcome: &RaceOutcome) -> String {
    match outcome {
        RaceOutcome::Winner(rec) => format!(
            "API: {}\nCEP: {}\nLocalidade: {}\nUF: {}\nLogradouro: {}",
            rec.provider, rec.code, rec.locality, rec.region, rec.street
        ),
        RaceOutcome::Timeout => TIMEOUT_NOTICE.to_string(),
    }
}
