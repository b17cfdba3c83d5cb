// ---------------------------------------------------------------------------
// Scene – the five steps of the guided narrative
// ---------------------------------------------------------------------------

/// One step of the narrative.  Each variant is bound to exactly one renderer
/// in `ui::scenes`; dispatch is an exhaustive `match`, so adding a scene
/// without a renderer does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    #[default]
    Overview,
    Manufacturers,
    YearTrends,
    Efficiency,
    Explorer,
}

impl Scene {
    /// Narrative order.
    pub const ALL: [Scene; 5] = [
        Scene::Overview,
        Scene::Manufacturers,
        Scene::YearTrends,
        Scene::Efficiency,
        Scene::Explorer,
    ];

    /// 1-based position in the narrative, shown in the scene strip.
    pub fn number(self) -> usize {
        Scene::ALL.iter().position(|&s| s == self).unwrap_or(0) + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            Scene::Overview => "Welcome to the Cars Dataset",
            Scene::Manufacturers => "Manufacturer Analysis",
            Scene::YearTrends => "Year Trends",
            Scene::Efficiency => "Regional Efficiency Analysis",
            Scene::Explorer => "Detailed Exploration",
        }
    }

    /// The following scene, `None` at the end of the story.
    pub fn next(self) -> Option<Scene> {
        Scene::ALL.get(self.number()).copied()
    }

    /// The previous scene, `None` at the start.
    pub fn back(self) -> Option<Scene> {
        self.number().checked_sub(2).and_then(|i| Scene::ALL.get(i).copied())
    }
}

// ---------------------------------------------------------------------------
// ExplorerView – scene 5's chart modes
// ---------------------------------------------------------------------------

/// The three views of the Explorer scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorerView {
    #[default]
    Scatter,
    ParallelCoordinates,
    Radar,
}

impl ExplorerView {
    pub const ALL: [ExplorerView; 3] = [
        ExplorerView::Scatter,
        ExplorerView::ParallelCoordinates,
        ExplorerView::Radar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExplorerView::Scatter => "Scatter Plot",
            ExplorerView::ParallelCoordinates => "Parallel Coordinates",
            ExplorerView::Radar => "Radar Chart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_run_one_through_five() {
        let numbers: Vec<usize> = Scene::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn next_and_back_walk_the_narrative() {
        assert_eq!(Scene::Overview.back(), None);
        assert_eq!(Scene::Overview.next(), Some(Scene::Manufacturers));
        assert_eq!(Scene::Explorer.next(), None);
        assert_eq!(Scene::Explorer.back(), Some(Scene::Efficiency));

        // next then back is the identity away from the ends.
        for scene in [Scene::Manufacturers, Scene::YearTrends, Scene::Efficiency] {
            assert_eq!(scene.next().unwrap().back(), Some(scene));
        }
    }
}
