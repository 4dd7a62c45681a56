use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::scene::Scene;

/// Reports every frame without a single annotation.
pub fn validate_empty_frames(scene: &Scene) -> Vec<Issue> {
    scene
        .frames
        .iter()
        .filter(|(_, frame)| frame.annotations.is_empty())
        .map(|(frame_id, _)| {
            Issue::new(IssueKind::EmptyFrames, IssueIdentifiers::new().frame(*frame_id))
                .with_reason("Frame has no annotations.")
        })
        .collect()
}
