//! Scaling filter-graph construction.
//!
//! One decoded source stream fans out into one scaled stream per rendition.
//! The scale factor is expressed symbolically (`iw`/`ih` are only known to the
//! engine at decode time) and both axes are truncated to even integers, which
//! the downstream video codec requires.

use crate::ladder::{Rendition, RenditionLadder};

/// Internal label of the scaled stream for rendition `index` (`v0`, `v1`, …).
///
/// The command builder maps each of these to its own output.
pub fn stream_label(index: usize) -> String {
    format!("v{index}")
}

/// Build the full `-filter_complex` expression for the ladder.
///
/// Returns an empty string for an empty ladder; an empty graph is not valid
/// engine input, so callers must short-circuit before invoking the engine.
pub fn scale_filter_graph(ladder: &RenditionLadder) -> String {
    ladder
        .iter()
        .enumerate()
        .map(|(index, rendition)| scale_chain(index, rendition))
        .collect::<Vec<_>>()
        .join(";")
}

/// One `[0:v]scale=...[vN]` chain, aspect-preserving, even dimensions.
fn scale_chain(index: usize, rendition: &Rendition) -> String {
    let w = rendition.width;
    let h = rendition.height;
    format!(
        "[0:v]scale='trunc(iw*min({w}/iw\\,{h}/ih)/2)*2':'trunc(ih*min({w}/iw\\,{h}/ih)/2)*2'[{label}]",
        label = stream_label(index)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_labels_are_sequential() {
        assert_eq!(stream_label(0), "v0");
        assert_eq!(stream_label(3), "v3");
    }

    #[test]
    fn single_rendition_chain() {
        let ladder = RenditionLadder::new(vec![Rendition::new("720p", 1280, 720, 2800)]);
        assert_eq!(
            scale_filter_graph(&ladder),
            "[0:v]scale='trunc(iw*min(1280/iw\\,720/ih)/2)*2':'trunc(ih*min(1280/iw\\,720/ih)/2)*2'[v0]"
        );
    }

    #[test]
    fn chains_are_joined_without_trailing_separator() {
        let graph = scale_filter_graph(&RenditionLadder::default());
        assert_eq!(graph.matches(';').count(), 3);
        assert!(!graph.ends_with(';'));
        assert!(graph.ends_with("[v3]"));
    }

    #[test]
    fn every_axis_is_truncated_to_even() {
        let graph = scale_filter_graph(&RenditionLadder::default());
        // Each rendition truncates both width and height: 2 per chain.
        assert_eq!(graph.matches("/2)*2'").count(), 8);
    }

    #[test]
    fn empty_ladder_yields_empty_graph() {
        assert_eq!(scale_filter_graph(&RenditionLadder::new(Vec::new())), "");
    }
}
