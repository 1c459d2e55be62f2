use crate::core::engine::{DashboardView, InsightEngine};
use crate::domain::model::{SelectionState, Stage, Theme, ThemeFilter};
use crate::utils::error::Result;

/// 呈現層送進來的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SelectCohort(String),
    SelectThemeFilter(ThemeFilter),
    /// 點擊某個主題在某個時間點的長條
    BarClicked { stage: Stage, theme: Theme },
}

/// 一個互動工作階段，獨佔自己的選取狀態
pub struct DashboardSession<'e> {
    engine: &'e InsightEngine,
    selection: SelectionState,
}

impl<'e> DashboardSession<'e> {
    pub fn new(engine: &'e InsightEngine) -> Self {
        Self {
            selection: engine.initial_selection(),
            engine,
        }
    }

    pub fn with_selection(engine: &'e InsightEngine, selection: SelectionState) -> Result<Self> {
        engine.cohort(selection.cohort_id())?;
        Ok(Self { engine, selection })
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn view(&self) -> Result<DashboardView<'e>> {
        self.engine.view(&self.selection)
    }

    /// 套用操作後重新計算；失敗時選取狀態不變
    pub fn apply(&mut self, event: SelectionEvent) -> Result<DashboardView<'e>> {
        let mut next = self.selection.clone();
        match event {
            SelectionEvent::SelectCohort(id) => {
                self.engine.cohort(&id)?;
                next.set_cohort(id);
            }
            SelectionEvent::SelectThemeFilter(filter) => next.set_theme_filter(filter),
            SelectionEvent::BarClicked { stage, theme } => next.select_bar(stage, theme),
        }

        let view = self.engine.view(&next)?;
        tracing::debug!(
            "Selection changed: cohort={}, stage={}, theme={}",
            next.cohort_id(),
            next.stage(),
            next.theme_filter()
        );
        self.selection = next;
        Ok(view)
    }
}
