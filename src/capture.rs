//! Quick Capture
//!
//! Two steps: pick (or create) a collection, then type the task.

use crate::models::{next_collection_color, Collection, Task};
use crate::optimistic::Mutation;
use crate::view_state::ActiveView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureStep {
    #[default]
    Collection,
    Task,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureChoice {
    Existing(Collection),
    Create(String),
}

impl CaptureChoice {
    pub fn name(&self) -> &str {
        match self {
            CaptureChoice::Existing(c) => &c.name,
            CaptureChoice::Create(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    None,
    Close,
    Submit { choice: CaptureChoice, text: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureState {
    pub step: CaptureStep,
    pub query: String,
    pub selected: usize,
    pub choice: Option<CaptureChoice>,
}

impl CaptureState {
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected = 0;
    }

    /// Matching collections, plus a create entry when no name matches exactly
    pub fn options(&self, collections: &[Collection]) -> Vec<CaptureChoice> {
        if self.step != CaptureStep::Collection {
            return Vec::new();
        }
        let q = self.query.trim().to_lowercase();
        let mut options: Vec<CaptureChoice> = collections
            .iter()
            .filter(|c| q.is_empty() || c.name.to_lowercase().contains(&q))
            .cloned()
            .map(CaptureChoice::Existing)
            .collect();
        if !q.is_empty() && !collections.iter().any(|c| c.name.to_lowercase() == q) {
            options.push(CaptureChoice::Create(self.query.trim().to_string()));
        }
        options
    }

    pub fn choose(&mut self, choice: CaptureChoice) {
        self.choice = Some(choice);
        self.step = CaptureStep::Task;
        self.set_query(String::new());
    }

    pub fn back(&mut self) {
        self.choice = None;
        self.step = CaptureStep::Collection;
        self.set_query(String::new());
    }

    pub fn handle_key(&mut self, key: &str, collections: &[Collection]) -> CaptureOutcome {
        match (self.step, key) {
            (CaptureStep::Collection, "Escape") => CaptureOutcome::Close,
            (CaptureStep::Task, "Escape") => {
                self.back();
                CaptureOutcome::None
            }
            (CaptureStep::Collection, "ArrowDown") => {
                let len = self.options(collections).len();
                self.selected = (self.selected + 1).min(len.saturating_sub(1));
                CaptureOutcome::None
            }
            (CaptureStep::Collection, "ArrowUp") => {
                self.selected = self.selected.saturating_sub(1);
                CaptureOutcome::None
            }
            (CaptureStep::Collection, "Enter") => {
                if let Some(choice) = self.options(collections).into_iter().nth(self.selected) {
                    self.choose(choice);
                }
                CaptureOutcome::None
            }
            (CaptureStep::Task, "Enter") => self.submit(),
            (CaptureStep::Task, "Backspace") if self.query.is_empty() => {
                self.back();
                CaptureOutcome::None
            }
            _ => CaptureOutcome::None,
        }
    }

    fn submit(&self) -> CaptureOutcome {
        let text = self.query.trim();
        match &self.choice {
            Some(choice) if !text.is_empty() => CaptureOutcome::Submit {
                choice: choice.clone(),
                text: text.to_string(),
            },
            _ => CaptureOutcome::None,
        }
    }
}

/// Mutations for a submitted capture, in the order they must reach the
/// backend, and the view to open afterwards
pub fn capture_mutations(
    choice: &CaptureChoice,
    text: &str,
    collections: &[Collection],
    new_collection_id: String,
    new_task_id: String,
    now: i64,
) -> (Vec<Mutation>, ActiveView) {
    let mut mutations = Vec::new();
    let collection_id = match choice {
        CaptureChoice::Existing(c) => c.id.clone(),
        CaptureChoice::Create(name) => {
            let mut collection = Collection::new(
                new_collection_id.clone(),
                name.clone(),
                next_collection_color(collections.len()),
            );
            collection.sort_order = collections.iter().map(|c| c.sort_order).max().unwrap_or(0) + 1;
            mutations.push(Mutation::AddCollection(collection));
            new_collection_id
        }
    };
    mutations.push(Mutation::AddTask(Task::new(new_task_id, text, collection_id.clone(), now)));
    (mutations, ActiveView::Collection(collection_id))
}
